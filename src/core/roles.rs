//! Opaque permission payload

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Roles returned by the user resource
///
/// The admin never inspects the payload; it only gates the create action on
/// whether something non-empty came back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roles(pub Value);

impl Roles {
    pub fn is_granted(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::Bool(granted) => *granted,
            Value::Number(_) => true,
        }
    }
}
