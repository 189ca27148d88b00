//! One row of the order list

use crate::core::order::Order;

/// Actions offered by a row's menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Open the order in the form dialog, read-only
    MoreInfo,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::MoreInfo => "More information",
        }
    }
}

/// A rendered order row
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    order: Order,
}

impl ListItem {
    pub fn new(order: Order) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Cell texts: description, quantity, price
    pub fn cells(&self) -> [String; 3] {
        [
            self.order.description.clone(),
            self.order.qtd.to_string(),
            format!("{:.2}", self.order.price),
        ]
    }

    pub fn actions(&self) -> &'static [RowAction] {
        &[RowAction::MoreInfo]
    }

    /// Run a menu action, handing this row's order to the edit callback
    pub fn trigger<F>(&self, action: RowAction, on_edit: F)
    where
        F: FnOnce(&Order),
    {
        match action {
            RowAction::MoreInfo => on_edit(&self.order),
        }
    }
}
