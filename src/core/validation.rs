//! Form schema validation
//!
//! The schema itself lives on [`OrderForm`] as `#[validate]` attributes; this
//! module runs it and flattens the report into one message per field.

use validator::Validate;

use crate::core::error::FieldErrors;
use crate::core::order::{OrderField, OrderForm};

/// Message used when a numeric control holds text that is not a number
pub const NOT_A_NUMBER: &str = "must be a number";

/// Validate the current form values against the order schema
pub fn validate_form(form: &OrderForm) -> Result<(), FieldErrors> {
    let Err(report) = form.validate() else {
        return Ok(());
    };

    let mut errors = FieldErrors::new();
    for (name, failures) in report.field_errors() {
        let Some(field) = OrderField::from_name(&name) else {
            continue;
        };
        if let Some(failure) = failures.first() {
            let message = failure
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| failure.code.to_string());
            errors.insert(field, message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse the raw text of a numeric control
///
/// Blank text means "no value"; anything else must be a finite number.
pub fn parse_number(raw: &str) -> Result<Option<f64>, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(NOT_A_NUMBER),
    }
}
