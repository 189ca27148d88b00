//! # Order Admin
//!
//! A headless admin panel for managing orders: a paginated list view, a
//! create/view form workflow and a thin REST client.
//!
//! ## Features
//!
//! - **Typed REST client**: pluggable [`ApiTransport`](core::transport::ApiTransport)
//!   with a reqwest implementation and an in-process one
//! - **Order Service**: paginated listing and strict payload shaping on save
//! - **Form Workflow**: open/validate/submit/close lifecycle with per-field errors
//! - **List View**: roles-gated create action, row actions, refresh after save
//! - **In-memory backend**: an axum router implementing the order API for demos and tests
//! - **Configuration-Based**: YAML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_admin::prelude::*;
//!
//! let config = AdminConfig::from_yaml_file("admin.yaml")?.apply_env();
//! let app = AdminApp::from_config(&config)?;
//!
//! let mut list = app.list_view();
//! list.mount().await;
//!
//! if list.create() {
//!     let dialog = list.dialog_mut();
//!     dialog.set_input(OrderField::Description, "Widget");
//!     dialog.set_input(OrderField::Qtd, "2");
//!     dialog.set_input(OrderField::Price, "9.5");
//! }
//!
//! match list.submit_form().await {
//!     SubmitOutcome::Saved(order) => println!("created {:?}", order.id),
//!     other => println!("not saved: {:?}", other),
//! }
//! ```

pub mod admin;
pub mod app;
pub mod client;
pub mod config;
pub mod core;
pub mod logging;
#[cfg(feature = "in-memory")]
pub mod server;
pub mod services;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{AdminError, FieldErrors},
        order::{Order, OrderField, OrderForm, OrderId},
        pagination::{PaginatedResult, PaginationParams, SortDirection},
        roles::Roles,
        transport::ApiTransport,
    };

    // === Services ===
    pub use crate::services::{OrderPayload, OrderService, UserService};

    // === Admin components ===
    pub use crate::admin::{
        CloseReason, DialogBody, DialogPhase, FormDialog, ListBody, ListItem, ListView, Notice,
        NoticeBoard, Notifier, PageState, PendingSave, RolesGate, RolesState, RowAction,
        SaveCompletion, SubmitBlocked, SubmitOutcome, TracingNotifier,
    };

    // === Wiring ===
    pub use crate::app::AdminApp;
    pub use crate::client::HttpTransport;
    pub use crate::config::{AdminConfig, ApiConfig, LoggingConfig, NoticesConfig, ResourcesConfig};

    // === In-memory backend ===
    #[cfg(feature = "in-memory")]
    pub use crate::server::{InMemoryOrderStore, InMemoryTransport, MockServerState};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
