//! HTTP handlers for the mock order API

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use validator::Validate;

use crate::config::ResourcesConfig;
use crate::core::order::Order;
use crate::core::pagination::{PaginatedResult, PaginationParams};
use crate::server::store::{CreateOrderRequest, InMemoryOrderStore};

/// State shared across handlers
///
/// Besides the store it carries the roles payload and switches that make the
/// backend fail on purpose, so clients can exercise their error paths.
#[derive(Debug, Clone)]
pub struct MockServerState {
    pub store: InMemoryOrderStore,
    roles: Arc<RwLock<Value>>,
    roles_unavailable: Arc<AtomicBool>,
    saves_unavailable: Arc<AtomicBool>,
}

impl MockServerState {
    pub fn new(store: InMemoryOrderStore) -> Self {
        Self {
            store,
            roles: Arc::new(RwLock::new(json!(["admin"]))),
            roles_unavailable: Arc::new(AtomicBool::new(false)),
            saves_unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replace the payload served by the roles resource
    pub fn set_roles(&self, roles: Value) {
        match self.roles.write() {
            Ok(mut current) => *current = roles,
            Err(poisoned) => *poisoned.into_inner() = roles,
        }
    }

    /// Make the roles resource answer 503 until switched back
    pub fn set_roles_unavailable(&self, unavailable: bool) {
        self.roles_unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make `POST /order` answer 503 until switched back
    pub fn set_saves_unavailable(&self, unavailable: bool) {
        self.saves_unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn roles(&self) -> Value {
        self.roles
            .read()
            .map(|roles| roles.clone())
            .unwrap_or(Value::Null)
    }
}

impl Default for MockServerState {
    fn default() -> Self {
        Self::new(InMemoryOrderStore::new())
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Error body returned by every failing handler
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error code for programmatic handling
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Per-field messages for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Failures the mock API can answer with
#[derive(Debug)]
pub enum ServerError {
    InvalidJson(String),
    Validation(BTreeMap<String, Vec<String>>),
    Unavailable(&'static str),
    Internal(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ServerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> ErrorBody {
        match self {
            ServerError::InvalidJson(message) => ErrorBody {
                code: "INVALID_JSON",
                message,
                errors: None,
            },
            ServerError::Validation(errors) => ErrorBody {
                code: "VALIDATION_ERROR",
                message: "Validation failed".to_string(),
                errors: Some(errors),
            },
            ServerError::Unavailable(what) => ErrorBody {
                code: "SERVICE_UNAVAILABLE",
                message: format!("{} unavailable", what),
                errors: None,
            },
            ServerError::Internal(message) => ErrorBody {
                code: "INTERNAL_ERROR",
                message,
                errors: None,
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.into_body())).into_response()
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /order`
pub async fn list_orders(
    State(state): State<MockServerState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResult<Order>>, ServerError> {
    let page = state.store.list(&params)?;
    tracing::debug!(page = params.page, total = page.total, "Listed orders");
    Ok(Json(page))
}

/// `POST /order`
pub async fn create_order(
    State(state): State<MockServerState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ServerError> {
    if state.saves_unavailable.load(Ordering::SeqCst) {
        return Err(ServerError::Unavailable("Order storage"));
    }

    let Json(request) = payload.map_err(|e| ServerError::InvalidJson(e.body_text()))?;
    if let Err(report) = request.validate() {
        let errors: BTreeMap<String, Vec<String>> = report
            .field_errors()
            .into_iter()
            .map(|(field, failures)| {
                let messages: Vec<String> = failures
                    .iter()
                    .map(|f| {
                        f.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| f.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        return Err(ServerError::Validation(errors));
    }

    let order = state.store.create(request)?;
    tracing::info!(id = ?order.id, "Order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /user/roles`
pub async fn get_roles(State(state): State<MockServerState>) -> Result<Json<Value>, ServerError> {
    if state.roles_unavailable.load(Ordering::SeqCst) {
        return Err(ServerError::Unavailable("Roles service"));
    }
    Ok(Json(state.roles()))
}

/// Absolute route path for a configured resource
///
/// Resource paths may be written with or without the leading `/`.
fn route_path(resource: &str) -> String {
    format!("/{}", resource.trim_start_matches('/'))
}

/// Build the mock API router on the configured resource paths
pub fn router(state: MockServerState, resources: &ResourcesConfig) -> Router {
    Router::new()
        .route(&route_path(&resources.orders), get(list_orders).post(create_order))
        .route(&route_path(&resources.roles), get(get_roles))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_path_is_absolute() {
        assert_eq!(route_path("/order"), "/order");
        assert_eq!(route_path("order"), "/order");
        assert_eq!(route_path("//user/roles"), "/user/roles");
    }

    #[test]
    fn test_router_accepts_relative_resources() {
        let resources = ResourcesConfig {
            orders: "order".to_string(),
            roles: "user/roles".to_string(),
        };
        let _ = router(MockServerState::default(), &resources);
    }
}
