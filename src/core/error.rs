//! Typed error handling for the order admin
//!
//! Every fallible request in the crate returns [`AdminError`], so callers can
//! tell a payload that could not be built apart from a server rejection or a
//! broken connection. Schema violations never get this far: the form dialog
//! reports them as [`FieldErrors`] and sends nothing.
//!
//! # Error Categories
//!
//! - [`AdminError::InvalidQuantity`] / [`AdminError::MissingField`]: payload shaping failures
//! - [`AdminError::Transport`] / [`AdminError::Api`] / [`AdminError::Decode`]: transport and server errors
//!
//! # Example
//!
//! ```rust,ignore
//! match service.save(&form).await {
//!     Ok(order) => println!("created {:?}", order.id),
//!     Err(AdminError::Api { status, message }) if status.is_client_error() => {
//!         println!("rejected: {}", message);
//!     }
//!     Err(e) => eprintln!("save failed: {}", e),
//! }
//! ```

use reqwest::StatusCode;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::core::order::OrderField;

/// The main error type for the order admin
#[derive(Debug, Error)]
pub enum AdminError {
    /// Quantity could not be coerced to an integer
    #[error("Quantity '{value}' is not a valid integer")]
    InvalidQuantity { value: String },

    /// A field required by the payload is absent
    #[error("Missing required field '{field}'")]
    MissingField { field: OrderField },

    /// The request never produced a response (connect, timeout, body read)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server responded with {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// The response body could not be read
    #[error("Failed to read response body: {message}")]
    Body { message: String },

    /// The response body was not the expected JSON shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL or resource path does not form a valid URL
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl AdminError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminError::InvalidQuantity { .. } => "INVALID_QUANTITY",
            AdminError::MissingField { .. } => "MISSING_FIELD",
            AdminError::Transport(_) => "TRANSPORT_ERROR",
            AdminError::Api { .. } => "API_ERROR",
            AdminError::Body { .. } => "BODY_ERROR",
            AdminError::Decode(_) => "DECODE_ERROR",
            AdminError::InvalidUrl { .. } => "INVALID_URL",
        }
    }

    /// HTTP status reported by the server, if the error came from a response
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AdminError::Api { status, .. } => Some(*status),
            AdminError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the error was raised locally, before any request was issued
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            AdminError::InvalidQuantity { .. }
                | AdminError::MissingField { .. }
                | AdminError::InvalidUrl { .. }
        )
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Per-field validation messages, at most one per field
///
/// Ordered by field so rendering and comparisons are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<OrderField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, keeping the first one already present
    pub fn insert(&mut self, field: OrderField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: OrderField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: OrderField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn remove(&mut self, field: OrderField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Merge another set, keeping existing messages on conflict
    pub fn merge(&mut self, other: &FieldErrors) {
        for (field, message) in other.iter() {
            self.insert(field, message);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OrderField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "Validation errors: {}", msgs.join(", "))
    }
}

impl std::error::Error for FieldErrors {}
