//! Create/view order dialog
//!
//! The dialog owns the form values, runs the schema before anything is sent
//! and drives one save at a time through the [`OrderService`].
//!
//! ## Lifecycle
//!
//! ```text
//! Closed ──open()──▶ Open ──begin_submit()──▶ Validating ──ok──▶ Submitting
//!   ▲                 ▲                           │                 │
//!   │                 └──────── invalid ──────────┘                 │
//!   │                 ▲                                             │
//!   │                 └──────── finish_submit(Err) ─────────────────┤
//!   └──────────────────────── finish_submit(Ok) ────────────────────┘
//! ```
//!
//! Closing by any path (save, cancel, dismiss) resets every value and error,
//! so the next `open()` starts from the defaults or from the given order.

use std::sync::Arc;
use uuid::Uuid;

use crate::admin::notice::{Notice, Notifier};
use crate::admin::roles_gate::RolesGate;
use crate::core::error::{AdminError, FieldErrors};
use crate::core::order::{Order, OrderField, OrderForm};
use crate::core::validation::{parse_number, validate_form};
use crate::services::{OrderService, UserService};

/// Default text of the notice shown after a successful save
pub const ORDER_CREATED: &str = "Order created!";

/// Callback receiving the server's copy of a created order
pub type CompletionHandler = Box<dyn FnMut(&Order) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Closed,
    Open,
    /// Only observable from inside [`FormDialog::validate`]
    Validating,
    Submitting,
}

/// How the dialog was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Saved,
    Cancelled,
    /// Closed from outside the dialog (navigation, parent unmount)
    Dismissed,
}

/// Why a submit did not start
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitBlocked {
    Closed,
    /// The order already has an id
    ViewOnly,
    /// A save is already in flight
    Busy,
    /// Roles not loaded, empty, or failed
    RolesUnavailable,
    Invalid(FieldErrors),
}

/// Terminal result of one submit
#[derive(Debug)]
pub enum SubmitOutcome {
    Saved(Order),
    Failed(AdminError),
    Blocked(SubmitBlocked),
    /// The completion came from another dialog and is handed back untouched
    Ignored(SaveCompletion),
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }
}

/// What the dialog body shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogBody<'a> {
    /// The roles fetch failed: an error with a retry action replaces the fields
    RolesError { message: &'a str },
    Fields,
}

/// A validated save, detached from the dialog so it can run elsewhere
#[derive(Debug)]
pub struct PendingSave {
    orders: Arc<OrderService>,
    form: OrderForm,
    origin: Uuid,
    ticket: u64,
}

/// The outcome of a [`PendingSave`], to be handed back to the dialog
#[derive(Debug)]
pub struct SaveCompletion {
    origin: Uuid,
    ticket: u64,
    result: Result<Order, AdminError>,
}

impl PendingSave {
    /// The values being saved
    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub async fn execute(self) -> SaveCompletion {
        let result = self.orders.save(&self.form).await;
        SaveCompletion {
            origin: self.origin,
            ticket: self.ticket,
            result,
        }
    }
}

impl SaveCompletion {
    /// Id of the dialog that started the save
    pub fn origin(&self) -> Uuid {
        self.origin
    }

    pub fn result(&self) -> &Result<Order, AdminError> {
        &self.result
    }
}

/// The order form dialog
pub struct FormDialog {
    id: Uuid,
    orders: Arc<OrderService>,
    roles: RolesGate,
    notifier: Arc<dyn Notifier>,
    created_message: String,
    on_complete: Option<CompletionHandler>,

    phase: DialogPhase,
    values: OrderForm,
    errors: FieldErrors,
    input_errors: FieldErrors,
    submit_attempted: bool,
    submit_error: Option<String>,
    in_flight: Option<u64>,
    next_ticket: u64,
}

impl FormDialog {
    pub fn new(
        orders: Arc<OrderService>,
        users: Arc<UserService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            orders,
            roles: RolesGate::new(users),
            notifier,
            created_message: ORDER_CREATED.to_string(),
            on_complete: None,
            phase: DialogPhase::Closed,
            values: OrderForm::default(),
            errors: FieldErrors::new(),
            input_errors: FieldErrors::new(),
            submit_attempted: false,
            submit_error: None,
            in_flight: None,
            next_ticket: 0,
        }
    }

    pub fn with_created_message(mut self, message: impl Into<String>) -> Self {
        self.created_message = message.into();
        self
    }

    /// Register the callback invoked with every created order
    pub fn on_complete(mut self, handler: impl FnMut(&Order) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(handler));
        self
    }

    // === Roles ===

    /// Fetch roles for this dialog instance
    pub async fn mount(&mut self) {
        self.roles.load().await;
    }

    pub async fn retry_roles(&mut self) {
        self.roles.retry().await;
    }

    pub fn roles(&self) -> &RolesGate {
        &self.roles
    }

    // === State ===

    /// Identifies this dialog's saves
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != DialogPhase::Closed
    }

    /// Drives the progress indicator
    pub fn is_submitting(&self) -> bool {
        self.phase == DialogPhase::Submitting
    }

    pub fn values(&self) -> &OrderForm {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn field_error(&self, field: OrderField) -> Option<&str> {
        self.errors.get(field)
    }

    /// Dialog-level error from the last failed save
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn title(&self) -> &'static str {
        if self.values.is_view_only() {
            "View Order"
        } else {
            "New Order"
        }
    }

    pub fn body(&self) -> DialogBody<'_> {
        match self.roles.error() {
            Some(message) => DialogBody::RolesError { message },
            None => DialogBody::Fields,
        }
    }

    pub fn fields_disabled(&self) -> bool {
        self.values.is_view_only() || self.is_submitting()
    }

    /// The submit control only exists for drafts
    pub fn shows_submit(&self) -> bool {
        !self.values.is_view_only()
    }

    pub fn submit_disabled(&self) -> bool {
        self.fields_disabled() || !self.roles.is_granted()
    }

    // === Transitions ===

    /// Open the dialog, pre-filled from `order` or reset to the defaults
    ///
    /// Returns `false` if the dialog is already open.
    pub fn open(&mut self, order: Option<&Order>) -> bool {
        if self.is_open() {
            return false;
        }

        self.reset();
        if let Some(order) = order {
            self.values = OrderForm::from(order);
        }
        self.phase = DialogPhase::Open;

        tracing::debug!(order_id = ?self.values.id, "Form dialog opened");
        true
    }

    /// Close the dialog and reset the form
    ///
    /// Returns `false` if the dialog was already closed.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.is_open() {
            return false;
        }

        if self.in_flight.is_some() {
            tracing::debug!(?reason, "Form dialog closed with a save in flight");
        }
        self.reset();
        self.phase = DialogPhase::Closed;

        tracing::debug!(?reason, "Form dialog closed");
        true
    }

    pub fn cancel(&mut self) -> bool {
        self.close(CloseReason::Cancelled)
    }

    pub fn dismiss(&mut self) -> bool {
        self.close(CloseReason::Dismissed)
    }

    fn reset(&mut self) {
        self.values = OrderForm::default();
        self.errors.clear();
        self.input_errors.clear();
        self.submit_attempted = false;
        self.submit_error = None;
        self.in_flight = None;
    }

    // === Editing ===

    /// Apply raw control text to a field
    ///
    /// Ignored (returns `false`) while the dialog is closed or the fields are
    /// disabled. Numeric fields record a "must be a number" error for text
    /// that does not parse.
    pub fn set_input(&mut self, field: OrderField, raw: &str) -> bool {
        if self.phase != DialogPhase::Open || self.fields_disabled() {
            return false;
        }

        match field {
            OrderField::Description => self.values.description = raw.to_string(),
            OrderField::Qtd | OrderField::Price => {
                self.input_errors.remove(field);
                let parsed = parse_number(raw).unwrap_or_else(|message| {
                    self.input_errors.insert(field, message);
                    None
                });
                if field == OrderField::Qtd {
                    self.values.qtd = parsed;
                } else {
                    self.values.price = parsed;
                }
            }
        }

        if self.submit_attempted {
            let _ = self.validate();
        }
        true
    }

    /// Run the schema against the current values and publish the errors
    pub fn validate(&mut self) -> Result<(), FieldErrors> {
        let resume = self.phase;
        self.phase = DialogPhase::Validating;

        let mut errors = self.input_errors.clone();
        if let Err(schema) = validate_form(&self.values) {
            errors.merge(&schema);
        }
        self.errors = errors;

        self.phase = resume;
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.clone())
        }
    }

    // === Submission ===

    /// Validate and, if the form is valid, mark the dialog busy
    pub fn begin_submit(&mut self) -> Result<PendingSave, SubmitBlocked> {
        match self.phase {
            DialogPhase::Closed => return Err(SubmitBlocked::Closed),
            DialogPhase::Submitting => return Err(SubmitBlocked::Busy),
            DialogPhase::Open | DialogPhase::Validating => {}
        }
        if self.values.is_view_only() {
            return Err(SubmitBlocked::ViewOnly);
        }
        if !self.roles.is_granted() {
            return Err(SubmitBlocked::RolesUnavailable);
        }

        self.submit_attempted = true;
        self.submit_error = None;
        if let Err(errors) = self.validate() {
            tracing::debug!(%errors, "Order form rejected");
            return Err(SubmitBlocked::Invalid(errors));
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.phase = DialogPhase::Submitting;

        Ok(PendingSave {
            orders: Arc::clone(&self.orders),
            form: self.values.clone(),
            origin: self.id,
            ticket,
        })
    }

    /// Apply the outcome of a save started by [`begin_submit`](Self::begin_submit)
    ///
    /// A success always notifies the caller and posts the notice; it closes
    /// the dialog only if that save is still the one in flight. A failure on a
    /// save nobody waits for any more is only logged. Completions started by
    /// another dialog are returned as [`SubmitOutcome::Ignored`].
    pub fn finish_submit(&mut self, completion: SaveCompletion) -> SubmitOutcome {
        if completion.origin != self.id {
            tracing::warn!(
                dialog = %self.id,
                origin = %completion.origin,
                "Ignoring save completion from another dialog"
            );
            return SubmitOutcome::Ignored(completion);
        }

        let current = self.in_flight == Some(completion.ticket);
        if current {
            self.in_flight = None;
        }

        match completion.result {
            Ok(order) => {
                self.notifier.show(Notice::new(self.created_message.clone()));
                if let Some(handler) = self.on_complete.as_mut() {
                    handler(&order);
                }
                if current {
                    self.close(CloseReason::Saved);
                }
                SubmitOutcome::Saved(order)
            }
            Err(e) => {
                tracing::error!(error = %e, code = e.error_code(), "Failed to save order");
                if current {
                    self.phase = DialogPhase::Open;
                    self.submit_error = Some(e.to_string());
                }
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Validate, save and apply the outcome in one step
    pub async fn submit(&mut self) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(blocked) => return SubmitOutcome::Blocked(blocked),
        };
        let completion = pending.execute().await;
        self.finish_submit(completion)
    }
}

impl std::fmt::Debug for FormDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormDialog")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("submit_error", &self.submit_error)
            .field("roles", &self.roles.state())
            .finish_non_exhaustive()
    }
}
