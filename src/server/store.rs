//! In-memory order storage for the mock backend

use anyhow::{Result, anyhow};
use chrono::Utc;
use serde::Deserialize;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::{Arc, RwLock};
use validator::Validate;

use crate::core::order::{Order, OrderId};
use crate::core::pagination::{PaginatedResult, PaginationParams, SortDirection};

/// Page size used when the request does not set one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page the store will return
pub const MAX_PAGE_SIZE: u32 = 100;

/// Body accepted by `POST /order`
///
/// Unknown keys (an `id`, for instance) are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 3, max = 250, message = "must be between 3 and 250 characters"))]
    pub description: String,

    #[validate(range(min = 1, message = "must be at least 1"))]
    pub qtd: i64,

    pub price: f64,
}

/// Thread-safe order list with server-assigned ids
///
/// Ids start at 1 and never repeat, even across clones of the store.
#[derive(Debug, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Persist a validated request and return the stored record
    pub fn create(&self, request: CreateOrderRequest) -> Result<Order> {
        let now = Utc::now();
        let order = Order {
            id: Some(OrderId(self.next_id.fetch_add(1, AtomicOrdering::SeqCst))),
            description: request.description,
            qtd: request.qtd,
            price: request.price,
            created_date: Some(now),
            updated_date: Some(now),
        };

        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        orders.push(order.clone());

        Ok(order)
    }

    pub fn get(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(orders.iter().find(|o| o.id == Some(id)).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(orders.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Filter, sort and slice one page
    ///
    /// `term` matches descriptions case-insensitively; `sort` accepts
    /// `description`, `qtd`, `price` or `id` (the default).
    pub fn list(&self, params: &PaginationParams) -> Result<PaginatedResult<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let term = params
            .term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        let mut matching: Vec<Order> = orders
            .iter()
            .filter(|o| {
                term.as_ref()
                    .is_none_or(|t| o.description.to_lowercase().contains(t.as_str()))
            })
            .cloned()
            .collect();
        drop(orders);

        let sort = params.sort.as_deref().unwrap_or("id");
        matching.sort_by(|a, b| compare(a, b, sort));
        if params.sort_direction == Some(SortDirection::Desc) {
            matching.reverse();
        }

        let page_size = params
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE) as usize;
        let start = (params.page.max(1) as usize - 1) * page_size;

        Ok(PaginatedResult {
            total: matching.len() as u64,
            results: matching.into_iter().skip(start).take(page_size).collect(),
        })
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(a: &Order, b: &Order, field: &str) -> Ordering {
    match field {
        "description" => a.description.cmp(&b.description),
        "qtd" => a.qtd.cmp(&b.qtd),
        "price" => a.price.total_cmp(&b.price),
        _ => a.id.cmp(&b.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(description: &str, qtd: i64, price: f64) -> CreateOrderRequest {
        CreateOrderRequest {
            description: description.to_string(),
            qtd,
            price,
        }
    }

    fn seeded() -> InMemoryOrderStore {
        let store = InMemoryOrderStore::new();
        store.create(request("Widget", 2, 9.5)).unwrap();
        store.create(request("Gadget", 1, 20.0)).unwrap();
        store.create(request("Widget XL", 5, 3.0)).unwrap();
        store
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = seeded();
        assert_eq!(store.len().unwrap(), 3);

        let gadget = store.get(OrderId(2)).unwrap().unwrap();
        assert_eq!(gadget.description, "Gadget");
        assert!(gadget.created_date.is_some());
    }

    #[test]
    fn test_list_filters_by_term() {
        let store = seeded();
        let page = store.list(&PaginationParams::default().with_term("widget")).unwrap();

        assert_eq!(page.total, 2);
        assert!(page.results.iter().all(|o| o.description.starts_with("Widget")));
    }

    #[test]
    fn test_list_sorts_and_pages() {
        let store = seeded();
        let params = PaginationParams::new(1)
            .with_page_size(2)
            .with_sort("price", SortDirection::Desc);

        let first = store.list(&params).unwrap();
        assert_eq!(first.total, 3);
        let prices: Vec<f64> = first.results.iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![20.0, 9.5]);

        let second = store.list(&params.at_page(2)).unwrap();
        assert_eq!(second.results.len(), 1);
        assert_eq!(second.results[0].price, 3.0);
    }

    #[test]
    fn test_page_size_is_clamped() {
        let store = seeded();
        let page = store.list(&PaginationParams::new(1).with_page_size(0)).unwrap();
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn test_create_request_validation() {
        assert!(request("Widget", 1, 0.0).validate().is_ok());
        assert!(request("ab", 1, 0.0).validate().is_err());
        assert!(request("Widget", 0, 0.0).validate().is_err());
    }
}
