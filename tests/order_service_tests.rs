//! Order and user service tests over a scripted transport
//!
//! Run with: `cargo test --test order_service_tests`

mod harness;

use harness::*;
use serde_json::json;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};

use order_admin::prelude::*;

fn service(transport: &Arc<ScriptedTransport>) -> OrderService {
    let api: Arc<dyn ApiTransport> = transport.clone();
    OrderService::new(api)
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// List
// ============================================================================

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_forwards_query_and_returns_page() {
        let transport = ScriptedTransport::new();
        transport.on_get(
            ORDERS,
            page_json(
                1,
                vec![json!({
                    "id": 1,
                    "description": "Widget",
                    "qtd": 2,
                    "price": 9.5,
                    "createdDate": "2026-01-02T03:04:05Z"
                })],
            ),
        );

        let params = PaginationParams::new(1)
            .with_page_size(10)
            .with_term("wid")
            .with_sort("price", SortDirection::Desc);
        let page = assert_ok!(service(&transport).list(&params).await);

        assert_eq!(page.total, 1);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, Some(OrderId(1)));
        assert_eq!(page.results[0].description, "Widget");
        assert!(page.results[0].created_date.is_some());

        assert_eq!(
            transport.gets(ORDERS),
            vec![pairs(&[
                ("page", "1"),
                ("pageSize", "10"),
                ("term", "wid"),
                ("sort", "price"),
                ("sortDirection", "desc"),
            ])]
        );
    }

    #[tokio::test]
    async fn test_list_default_params_send_only_the_page() {
        let transport = ScriptedTransport::new();
        transport.on_get(ORDERS, page_json(0, vec![]));

        let page = assert_ok!(service(&transport).list(&PaginationParams::default()).await);

        assert_eq!(page, PaginatedResult::empty());
        assert_eq!(transport.gets(ORDERS), vec![pairs(&[("page", "1")])]);
    }

    #[tokio::test]
    async fn test_list_failure_propagates_unchanged() {
        let transport = ScriptedTransport::new();
        transport.on_get_status(ORDERS, 500, "database down");

        let err = assert_err!(service(&transport).list(&PaginationParams::default()).await);

        match err {
            AdminError::Api { status, message } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(message, "database down");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_rejects_malformed_page() {
        let transport = ScriptedTransport::new();
        transport.on_get(ORDERS, json!({ "items": [] }));

        let err = assert_err!(service(&transport).list(&PaginationParams::default()).await);
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_custom_resource_path() {
        let transport = ScriptedTransport::new();
        transport.on_get("/v2/orders", page_json(0, vec![]));

        let api: Arc<dyn ApiTransport> = transport.clone();
        let service = OrderService::with_resource(api, "/v2/orders");
        assert_ok!(service.list(&PaginationParams::default()).await);

        assert_eq!(service.resource(), "/v2/orders");
        assert_eq!(transport.gets("/v2/orders").len(), 1);
        assert!(transport.gets(ORDERS).is_empty());
    }
}

// ============================================================================
// Save
// ============================================================================

mod save_tests {
    use super::*;

    fn form(qtd: f64) -> OrderForm {
        OrderForm {
            id: None,
            description: "Widget".to_string(),
            qtd: Some(qtd),
            price: Some(9.5),
        }
    }

    #[tokio::test]
    async fn test_save_posts_exact_payload() {
        let transport = ScriptedTransport::new();
        transport.on_post(ORDERS, order_json(42, "Widget", 2, 9.5));

        let order = assert_ok!(service(&transport).save(&form(2.0)).await);

        assert_eq!(order.id, Some(OrderId(42)));
        assert_eq!(
            transport.posts(ORDERS),
            vec![json!({ "description": "Widget", "qtd": 2, "price": 9.5 })]
        );
    }

    #[tokio::test]
    async fn test_save_coerces_fractional_quantity() {
        let transport = ScriptedTransport::new();
        transport.on_post(ORDERS, order_json(1, "Widget", 3, 9.5));

        assert_ok!(service(&transport).save(&form(3.7)).await);

        let posted = transport.posts(ORDERS);
        assert_eq!(posted[0]["qtd"], json!(3));
        assert!(posted[0]["qtd"].is_i64());
    }

    #[tokio::test]
    async fn test_save_never_sends_the_id() {
        let transport = ScriptedTransport::new();
        transport.on_post(ORDERS, order_json(8, "Widget", 2, 9.5));

        let mut model = form(2.0);
        model.id = Some(OrderId(7));
        assert_ok!(service(&transport).save(&model).await);

        let posted = transport.posts(ORDERS);
        assert!(posted[0].get("id").is_none());
        assert_eq!(posted[0].as_object().map(|o| o.len()), Some(3));
    }

    #[tokio::test]
    async fn test_invalid_quantity_sends_nothing() {
        let transport = ScriptedTransport::new();

        let err = assert_err!(service(&transport).save(&form(f64::NAN)).await);

        assert!(matches!(err, AdminError::InvalidQuantity { .. }));
        assert!(err.is_local());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_price_sends_nothing() {
        let transport = ScriptedTransport::new();
        let mut model = form(2.0);
        model.price = None;

        let err = assert_err!(service(&transport).save(&model).await);

        assert!(matches!(
            err,
            AdminError::MissingField {
                field: OrderField::Price
            }
        ));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_save_rejection_propagates() {
        let transport = ScriptedTransport::new();
        transport.on_post_status(ORDERS, 422, "Validation failed");

        let err = assert_err!(service(&transport).save(&form(2.0)).await);

        assert_eq!(err.status().map(|s| s.as_u16()), Some(422));
        assert_eq!(transport.posts(ORDERS).len(), 1);
    }
}

// ============================================================================
// Roles
// ============================================================================

mod user_service_tests {
    use super::*;

    #[tokio::test]
    async fn test_roles_are_fetched_from_resource() {
        let transport = ScriptedTransport::new();
        transport.on_get(ROLES, json!(["admin", "sales"]));

        let api: Arc<dyn ApiTransport> = transport.clone();
        let roles = assert_ok!(UserService::new(api).roles().await);

        assert!(roles.is_granted());
        assert_eq!(transport.gets(ROLES), vec![Vec::<(String, String)>::new()]);
    }

    #[tokio::test]
    async fn test_empty_roles_are_not_granted() {
        let transport = ScriptedTransport::new();
        transport.on_get(ROLES, json!([]));

        let api: Arc<dyn ApiTransport> = transport.clone();
        let roles = assert_ok!(UserService::new(api).roles().await);

        assert!(!roles.is_granted());
    }
}
