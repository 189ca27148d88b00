//! Order resource client

use serde::Serialize;
use std::sync::Arc;

use crate::core::error::AdminError;
use crate::core::order::{Order, OrderField, OrderForm};
use crate::core::pagination::{PaginatedResult, PaginationParams};
use crate::core::transport::ApiTransport;

/// Default path of the order resource
pub const ORDERS_RESOURCE: &str = "/order";

/// Body of `POST /order`
///
/// Exactly these three fields are sent; anything else on the form (the id in
/// particular) is dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPayload {
    pub description: String,
    pub qtd: i64,
    pub price: f64,
}

impl OrderPayload {
    /// Shape a payload from form values, coercing the quantity to an integer
    pub fn from_form(model: &OrderForm) -> Result<Self, AdminError> {
        let qtd = model.qtd.ok_or(AdminError::MissingField {
            field: OrderField::Qtd,
        })?;
        let price = model.price.ok_or(AdminError::MissingField {
            field: OrderField::Price,
        })?;

        Ok(Self {
            description: model.description.clone(),
            qtd: parse_quantity(qtd)?,
            price,
        })
    }
}

/// Coerce a quantity to an integer, truncating toward zero
///
/// Fails for NaN, infinities and values outside the `i64` range.
pub fn parse_quantity(value: f64) -> Result<i64, AdminError> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63

    let truncated = value.trunc();
    if !truncated.is_finite() || truncated >= LIMIT || truncated < -LIMIT {
        return Err(AdminError::InvalidQuantity {
            value: value.to_string(),
        });
    }
    Ok(truncated as i64)
}

/// Lists and creates orders through an [`ApiTransport`]
///
/// Stateless apart from its transport: no caching, no retries. Failures from
/// the transport are returned as they are.
#[derive(Clone)]
pub struct OrderService {
    api: Arc<dyn ApiTransport>,
    resource: String,
}

impl OrderService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self::with_resource(api, ORDERS_RESOURCE)
    }

    pub fn with_resource(api: Arc<dyn ApiTransport>, resource: impl Into<String>) -> Self {
        Self {
            api,
            resource: resource.into(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Fetch one page of orders
    pub async fn list(&self, params: &PaginationParams) -> Result<PaginatedResult<Order>, AdminError> {
        tracing::debug!(resource = %self.resource, page = params.page, "Listing orders");
        self.api
            .get_json(&self.resource, &params.to_query_pairs())
            .await
    }

    /// Create an order from form values and return the server's record
    pub async fn save(&self, model: &OrderForm) -> Result<Order, AdminError> {
        let payload = OrderPayload::from_form(model)?;
        tracing::debug!(
            resource = %self.resource,
            qtd = payload.qtd,
            price = payload.price,
            "Saving order"
        );

        let order: Order = self.api.post_json(&self.resource, &payload).await?;
        tracing::debug!(id = ?order.id, "Order saved");
        Ok(order)
    }
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}
