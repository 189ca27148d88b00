//! Paginated order list with its form dialog

use std::sync::Arc;

use crate::admin::form_dialog::{FormDialog, SaveCompletion, SubmitOutcome};
use crate::admin::list_item::{ListItem, RowAction};
use crate::admin::roles_gate::RolesGate;
use crate::core::order::Order;
use crate::core::pagination::{PaginatedResult, PaginationParams};
use crate::services::{OrderService, UserService};

/// State of the current page request
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// What the list body shows, in priority order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListBody<'a> {
    /// Roles fetch failed: error with retry, nothing else is rendered
    RolesError { message: &'a str },
    Loading,
    /// Page fetch failed: error with a reload action
    PageError { message: &'a str },
    Rows(&'a [ListItem]),
}

/// The order list page
///
/// Owns its roles gate, its current page and the form dialog used for both
/// "new" and "more information".
#[derive(Debug)]
pub struct ListView {
    orders: Arc<OrderService>,
    roles: RolesGate,
    dialog: FormDialog,
    params: PaginationParams,
    page: PageState,
    items: Vec<ListItem>,
    total: u64,
    /// Most rows seen on one page of the current query
    largest_page: u64,
    mounted: bool,
}

impl ListView {
    pub fn new(orders: Arc<OrderService>, users: Arc<UserService>, dialog: FormDialog) -> Self {
        Self {
            orders,
            roles: RolesGate::new(users),
            dialog,
            params: PaginationParams::default(),
            page: PageState::Idle,
            items: Vec::new(),
            total: 0,
            largest_page: 0,
            mounted: false,
        }
    }

    pub fn with_params(mut self, params: PaginationParams) -> Self {
        self.params = params;
        self
    }

    // === Mounting ===

    /// Fetch roles and the first page; only the first call does anything
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::info!("Order list mounted");

        self.roles.load().await;
        self.dialog.mount().await;
        self.refresh().await;
    }

    /// Leave the page, dismissing the dialog if it is open
    pub fn unmount(&mut self) {
        self.dialog.dismiss();
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Re-issue the roles fetch after a failure
    pub async fn retry_roles(&mut self) {
        self.roles.retry().await;
        if self.dialog.roles().error().is_some() {
            self.dialog.retry_roles().await;
        }
    }

    pub fn roles(&self) -> &RolesGate {
        &self.roles
    }

    // === Paging ===

    /// Request a page and make `params` the current query
    pub async fn load(&mut self, params: PaginationParams) {
        if params.at_page(1) != self.params.at_page(1) {
            self.largest_page = 0;
        }
        self.params = params;
        self.page = PageState::Loading;

        match self.orders.list(&self.params).await {
            Ok(result) => self.apply_page(result),
            Err(e) => {
                tracing::error!(error = %e, page = self.params.page, "Failed to load orders");
                self.page = PageState::Failed(e.to_string());
            }
        }
    }

    fn apply_page(&mut self, result: PaginatedResult<Order>) {
        tracing::debug!(
            page = self.params.page,
            total = result.total,
            rows = result.results.len(),
            "Orders page loaded"
        );
        self.total = result.total;
        self.largest_page = self.largest_page.max(result.results.len() as u64);
        self.items = result.results.into_iter().map(ListItem::new).collect();
        self.page = PageState::Loaded;
    }

    /// Reload the current page
    pub async fn refresh(&mut self) {
        let params = self.params.clone();
        self.load(params).await;
    }

    /// Whether rows remain past the current page
    ///
    /// Without an explicit page size the server's is taken to be the largest
    /// page seen so far for this query. An empty page is always the last.
    pub fn has_next_page(&self) -> bool {
        if self.page != PageState::Loaded || self.items.is_empty() {
            return false;
        }
        let page_size = self
            .params
            .page_size
            .map(u64::from)
            .unwrap_or(self.largest_page);
        let seen = u64::from(self.params.page.saturating_sub(1)) * page_size + self.items.len() as u64;
        seen < self.total
    }

    pub fn has_previous_page(&self) -> bool {
        self.params.page > 1
    }

    pub async fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        let params = self.params.at_page(self.params.page + 1);
        self.load(params).await;
        true
    }

    pub async fn previous_page(&mut self) -> bool {
        if !self.has_previous_page() {
            return false;
        }
        let params = self.params.at_page(self.params.page - 1);
        self.load(params).await;
        true
    }

    // === Rendering ===

    pub fn params(&self) -> &PaginationParams {
        &self.params
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn body(&self) -> ListBody<'_> {
        if let Some(message) = self.roles.error() {
            return ListBody::RolesError { message };
        }
        match &self.page {
            PageState::Idle | PageState::Loading => ListBody::Loading,
            PageState::Failed(message) => ListBody::PageError { message },
            PageState::Loaded => ListBody::Rows(&self.items),
        }
    }

    /// The "new order" button is enabled
    pub fn can_create(&self) -> bool {
        self.roles.is_granted()
    }

    // === Actions ===

    /// Open the dialog on an empty draft
    pub fn create(&mut self) -> bool {
        if !self.can_create() {
            tracing::debug!("Create refused: roles not granted");
            return false;
        }
        self.dialog.open(None)
    }

    /// Run a row action; `MoreInfo` opens the dialog pre-filled with the row
    pub fn activate(&mut self, index: usize, action: RowAction) -> bool {
        let Some(item) = self.items.get(index) else {
            return false;
        };
        let mut opened = false;
        item.trigger(action, |order| opened = self.dialog.open(Some(order)));
        opened
    }

    pub fn dialog(&self) -> &FormDialog {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut FormDialog {
        &mut self.dialog
    }

    /// Submit the dialog and refresh the page after a successful save
    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let outcome = self.dialog.submit().await;
        if outcome.is_saved() {
            self.refresh().await;
        }
        outcome
    }

    /// Apply a save run outside the list (see [`FormDialog::begin_submit`])
    pub async fn finish_form(&mut self, completion: SaveCompletion) -> SubmitOutcome {
        let outcome = self.dialog.finish_submit(completion);
        if outcome.is_saved() {
            self.refresh().await;
        }
        outcome
    }
}
