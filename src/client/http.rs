//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::core::error::AdminError;
use crate::core::transport::{ApiTransport, api_error, decode_body};

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// JSON REST client over HTTP
///
/// Resource paths are appended to the base URL, so a base of
/// `https://host/api` and a path of `/order` address `https://host/api/order`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Create a transport with default client settings
    pub fn new(base_url: &str) -> Result<Self, AdminError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a transport from the `api` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self, AdminError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        let transport = Self::with_client(client, &config.base_url)?;
        Ok(match &config.token {
            Some(token) => transport.with_token(token.clone()),
            None => transport,
        })
    }

    /// Create a transport around an existing client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, AdminError> {
        Url::parse(base_url).map_err(|e| AdminError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a resource path against the base URL
    pub fn url(&self, path: &str) -> Result<Url, AdminError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| AdminError::InvalidUrl {
            url: joined.clone(),
            message: e.to_string(),
        })
    }

    async fn send(&self, request: RequestBuilder, method: &str, path: &str) -> Result<Value, AdminError> {
        let request_id = Uuid::new_v4();
        let mut request = request.header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(%request_id, method, path, "Sending API request");

        let response = request.send().await.inspect_err(|e| {
            tracing::debug!(%request_id, error = %e, "API request failed before a response");
        })?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(%request_id, status = status.as_u16(), "API response received");

        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        decode_body(&body)
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, AdminError> {
        let url = self.url(path)?;
        self.send(self.client.get(url).query(query), "GET", path).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, AdminError> {
        let url = self.url(path)?;
        self.send(self.client.post(url).json(&body), "POST", path).await
    }
}
