//! Composition root
//!
//! Services are built once here and handed to every component that needs
//! them; nothing in the crate reaches for a global instance.

use std::sync::Arc;

use crate::admin::{FormDialog, ListView, Notifier, TracingNotifier};
use crate::client::HttpTransport;
use crate::config::AdminConfig;
use crate::core::error::AdminError;
use crate::core::transport::ApiTransport;
use crate::services::{OrderService, UserService};

/// Shared services plus the settings components are built with
#[derive(Clone)]
pub struct AdminApp {
    orders: Arc<OrderService>,
    users: Arc<UserService>,
    notifier: Arc<dyn Notifier>,
    order_created: String,
}

impl AdminApp {
    /// Build an app talking HTTP to the configured API
    pub fn from_config(config: &AdminConfig) -> Result<Self, AdminError> {
        let transport = HttpTransport::from_config(&config.api)?;
        tracing::info!(base_url = %transport.base_url(), "Order admin configured");
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Build an app on any transport
    pub fn with_transport(api: Arc<dyn ApiTransport>, config: &AdminConfig) -> Self {
        Self {
            orders: Arc::new(OrderService::with_resource(
                Arc::clone(&api),
                config.resources.orders.clone(),
            )),
            users: Arc::new(UserService::with_roles_resource(
                api,
                config.resources.roles.clone(),
            )),
            notifier: Arc::new(TracingNotifier),
            order_created: config.notices.order_created.clone(),
        }
    }

    /// Route notices somewhere other than the log
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn orders(&self) -> &Arc<OrderService> {
        &self.orders
    }

    pub fn users(&self) -> &Arc<UserService> {
        &self.users
    }

    /// A new, closed form dialog
    pub fn form_dialog(&self) -> FormDialog {
        FormDialog::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.users),
            Arc::clone(&self.notifier),
        )
        .with_created_message(self.order_created.clone())
    }

    /// A new, unmounted list view with its own dialog
    pub fn list_view(&self) -> ListView {
        ListView::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.users),
            self.form_dialog(),
        )
    }
}

impl std::fmt::Debug for AdminApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApp")
            .field("orders", &self.orders)
            .field("users", &self.users)
            .field("order_created", &self.order_created)
            .finish_non_exhaustive()
    }
}
