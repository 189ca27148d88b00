//! Headless admin components: the order list and the order form dialog
//!
//! Components hold the state a UI would render and expose the operations a UI
//! would trigger. They never draw anything themselves.

pub mod form_dialog;
pub mod list_item;
pub mod list_view;
pub mod notice;
pub mod roles_gate;

pub use form_dialog::{
    CloseReason, CompletionHandler, DialogBody, DialogPhase, FormDialog, PendingSave,
    SaveCompletion, SubmitBlocked, SubmitOutcome,
};
pub use list_item::{ListItem, RowAction};
pub use list_view::{ListBody, ListView, PageState};
pub use notice::{Notice, NoticeBoard, Notifier, TracingNotifier};
pub use roles_gate::{RolesGate, RolesState};
