//! The order entity and the form values used to create one

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Server-assigned order identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// An order as exchanged with the `order` resource
///
/// An order without `id` is a draft; once the server assigns one the record
/// is read-only for this admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,

    pub description: String,

    /// Quantity
    pub qtd: i64,

    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
}

impl Order {
    /// A fresh draft with the default quantity and price
    pub fn draft() -> Self {
        Self {
            id: None,
            description: String::new(),
            qtd: 1,
            price: 0.0,
            created_date: None,
            updated_date: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// The editable fields of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    Description,
    Qtd,
    Price,
}

impl OrderField {
    pub const ALL: [OrderField; 3] = [OrderField::Description, OrderField::Qtd, OrderField::Price];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Description => "description",
            OrderField::Qtd => "qtd",
            OrderField::Price => "price",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "description" => Some(OrderField::Description),
            "qtd" => Some(OrderField::Qtd),
            "price" => Some(OrderField::Price),
            _ => None,
        }
    }

    /// Whether the field only accepts numeric input
    pub fn is_numeric(&self) -> bool {
        matches!(self, OrderField::Qtd | OrderField::Price)
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current values of the order form (a partial order)
///
/// Numeric fields are `None` when left blank. The `#[validate]` rules are the
/// form schema: description 3..=250 characters, quantity at least 1, price
/// present.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct OrderForm {
    pub id: Option<OrderId>,

    #[validate(length(min = 3, max = 250, message = "must be between 3 and 250 characters"))]
    pub description: String,

    #[validate(
        required(message = "is required"),
        range(min = 1.0, message = "must be at least 1")
    )]
    pub qtd: Option<f64>,

    #[validate(required(message = "is required"))]
    pub price: Option<f64>,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            id: None,
            description: String::new(),
            qtd: Some(1.0),
            price: Some(0.0),
        }
    }
}

impl From<&Order> for OrderForm {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            description: order.description.clone(),
            qtd: Some(order.qtd as f64),
            price: Some(order.price),
        }
    }
}

impl OrderForm {
    /// Orders that already have an id are shown, never edited
    pub fn is_view_only(&self) -> bool {
        self.id.is_some()
    }

    /// Text a form control would display for a field
    pub fn display_value(&self, field: OrderField) -> String {
        match field {
            OrderField::Description => self.description.clone(),
            OrderField::Qtd => self.qtd.map(|v| v.to_string()).unwrap_or_default(),
            OrderField::Price => self.price.map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}
