//! Transport seam between the services and the REST API
//!
//! Services only talk to an [`ApiTransport`]; the crate ships a reqwest
//! implementation ([`HttpTransport`](crate::client::HttpTransport)) and an
//! in-process one for the in-memory backend.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::error::AdminError;

/// Generic JSON REST client with GET and POST
///
/// Each call resolves exactly once, to the decoded body or an error. Paths are
/// resource paths relative to the API base (e.g. `/order`).
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// GET `path` with the given query-string pairs
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, AdminError>;

    /// POST a JSON body to `path`
    async fn post(&self, path: &str, body: Value) -> Result<Value, AdminError>;
}

impl dyn ApiTransport {
    /// GET and decode the body into `T`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, AdminError> {
        let value = self.get(path, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Encode `body`, POST it and decode the response into `T`
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AdminError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let value = self.post(path, body).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Build the error for a non-success response
///
/// Uses the body's `message` (or `error`) field when the body is a JSON
/// object, the raw text otherwise, and the status reason when empty.
pub fn api_error(status: StatusCode, body: &[u8]) -> AdminError {
    let text = String::from_utf8_lossy(body).trim().to_string();

    let message = match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(text),
        _ => text,
    };

    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        message
    };

    AdminError::Api { status, message }
}

/// Decode a successful response body, treating an empty body as `null`
pub fn decode_body(body: &[u8]) -> Result<Value, AdminError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}
