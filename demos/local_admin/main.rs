//! Order admin against a local mock API
//!
//! This demo:
//! - Starts the in-memory order API on a random local port
//! - Builds the admin over HTTP from configuration
//! - Lists orders, creates one through the form dialog and views it again
//!
//! Pass a YAML config path as the first argument to override the defaults.
//! Set `ORDER_ADMIN_API_URL` to run the same flow against a real API instead.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

use order_admin::config::ENV_API_URL;
use order_admin::logging::init_tracing;
use order_admin::prelude::*;
use order_admin::server;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AdminConfig::from_yaml_file(&path)?,
        None => AdminConfig::default(),
    };
    init_tracing(&config.logging)?;

    println!("📦 Order Admin Demo");
    println!("===================\n");

    let config = if std::env::var(ENV_API_URL).is_ok() {
        config.apply_env()
    } else {
        let state = MockServerState::default();
        seed(&state)?;
        let (addr, _server) = server::spawn(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            state,
            &config.resources,
        )
        .await
        .context("Failed to start the mock API")?;
        println!("🌐 Mock API listening on http://{}\n", addr);
        config.apply_overrides(Some(format!("http://{}", addr)), None)
    };

    let notices = NoticeBoard::new();
    let app = AdminApp::from_config(&config)?.with_notifier(Arc::new(notices.clone()));

    let mut list = app
        .list_view()
        .with_params(PaginationParams::new(1).with_page_size(10));
    list.mount().await;
    print_list(&list);

    if !list.create() {
        println!("⛔ Creating orders is not allowed for this user");
        return Ok(());
    }

    println!("📝 {}", list.dialog().title());
    let dialog = list.dialog_mut();
    dialog.set_input(OrderField::Description, "x");
    dialog.set_input(OrderField::Qtd, "0");
    dialog.set_input(OrderField::Price, "12.5");

    if let SubmitOutcome::Blocked(SubmitBlocked::Invalid(errors)) = list.submit_form().await {
        println!("   ❌ {}", errors);
    }

    let dialog = list.dialog_mut();
    dialog.set_input(OrderField::Description, "Sprocket set");
    dialog.set_input(OrderField::Qtd, "3");

    match list.submit_form().await {
        SubmitOutcome::Saved(order) => println!("   ✅ Saved order #{}", order.id.map(|id| id.0).unwrap_or_default()),
        SubmitOutcome::Failed(e) => println!("   ❌ Save failed: {}", e),
        SubmitOutcome::Blocked(reason) => println!("   ⛔ Not submitted: {:?}", reason),
        SubmitOutcome::Ignored(_) => println!("   ⛔ Save belonged to another dialog"),
    }
    for notice in notices.drain() {
        println!("   🔔 {}", notice.message);
    }
    println!();

    print_list(&list);

    let last = list.items().len().saturating_sub(1);
    if list.activate(last, RowAction::MoreInfo) {
        let dialog = list.dialog();
        println!("🔍 {}", dialog.title());
        for field in OrderField::ALL {
            println!("   {:<12} {}", field, dialog.values().display_value(field));
        }
        println!("   editable: {}", !dialog.fields_disabled());
        list.dialog_mut().cancel();
    }

    list.unmount();
    Ok(())
}

fn seed(state: &MockServerState) -> Result<()> {
    for (description, qtd, price) in [("Widget", 2, 9.5), ("Gadget", 1, 24.0)] {
        state.store.create(server::CreateOrderRequest {
            description: description.to_string(),
            qtd,
            price,
        })?;
    }
    Ok(())
}

fn print_list(list: &ListView) {
    match list.body() {
        ListBody::RolesError { message } => println!("⚠️  Roles unavailable: {}", message),
        ListBody::Loading => println!("⏳ Loading..."),
        ListBody::PageError { message } => println!("⚠️  Could not load orders: {}", message),
        ListBody::Rows(rows) => {
            println!("📋 Orders ({} total)", list.total());
            for row in rows {
                let [description, qtd, price] = row.cells();
                println!("   {:<20} {:>4} {:>10}", description, qtd, price);
            }
        }
    }
    println!();
}
