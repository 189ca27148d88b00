//! In-process transport over the mock router

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header};
use reqwest::Url;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::ResourcesConfig;
use crate::core::error::AdminError;
use crate::core::transport::{ApiTransport, api_error, decode_body};
use crate::server::router::{MockServerState, router};

/// Largest response body the transport will buffer
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// [`ApiTransport`] that hands requests straight to an axum [`Router`]
///
/// Requests go through the same extractors, validation and error mapping as
/// over HTTP, without a socket.
#[derive(Debug, Clone)]
pub struct InMemoryTransport {
    router: Router,
}

impl InMemoryTransport {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Transport over the mock API built from `state`
    pub fn from_state(state: MockServerState, resources: &ResourcesConfig) -> Self {
        Self::new(router(state, resources))
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Value, AdminError> {
        let uri = request_uri(path, query)?;
        let body = match body {
            Some(value) => Body::from(serde_json::to_vec(&value)?),
            None => Body::empty(),
        };

        let request = Request::builder()
            .method(method)
            .uri(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| AdminError::InvalidUrl {
                url: uri.clone(),
                message: e.to_string(),
            })?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| AdminError::Body {
                message: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(api_error(status, &bytes));
        }
        decode_body(&bytes)
    }
}

/// Path plus percent-encoded query string
fn request_uri(path: &str, query: &[(String, String)]) -> Result<String, AdminError> {
    let raw = format!("http://in-memory/{}", path.trim_start_matches('/'));
    let mut url = Url::parse(&raw).map_err(|e| AdminError::InvalidUrl {
        url: raw.clone(),
        message: e.to_string(),
    })?;

    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(match url.query() {
        Some(q) => format!("{}?{}", url.path(), q),
        None => url.path().to_string(),
    })
}

#[async_trait]
impl ApiTransport for InMemoryTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, AdminError> {
        self.call(Method::GET, path, query, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, AdminError> {
        self.call(Method::POST, path, &[], Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uri_encodes_query() {
        let uri = request_uri(
            "/order",
            &[
                ("page".to_string(), "1".to_string()),
                ("term".to_string(), "blue widget".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(uri, "/order?page=1&term=blue+widget");
    }

    #[test]
    fn test_request_uri_without_query() {
        assert_eq!(request_uri("user/roles", &[]).unwrap(), "/user/roles");
    }
}
