//! Pagination parameters and paginated responses

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction for list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Query parameters for a list request
///
/// Only `page` is always sent. Page size and ordering are left to the server
/// unless set explicitly.
///
/// # Example
/// ```rust,ignore
/// let params = PaginationParams::new(2).with_page_size(10).with_term("widget");
/// // GET /order?page=2&pageSize=10&term=widget
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Free-text search term
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,

    /// Field to sort on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

fn default_page() -> u32 {
    1
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(default_page())
    }
}

impl PaginationParams {
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: None,
            term: None,
            sort: None,
            sort_direction: None,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(field.into());
        self.sort_direction = Some(direction);
        self
    }

    /// The same query moved to another page
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Encode as query-string pairs, skipping unset parameters
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), self.page.to_string())];
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize".to_string(), page_size.to_string()));
        }
        if let Some(term) = &self.term {
            pairs.push(("term".to_string(), term.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(direction) = self.sort_direction {
            pairs.push(("sortDirection".to_string(), direction.to_string()));
        }
        pairs
    }
}

/// Paginated response structure returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    /// Total number of items matching the query (across all pages)
    pub total: u64,

    /// Items on the requested page
    pub results: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub fn empty() -> Self {
        Self {
            total: 0,
            results: Vec::new(),
        }
    }

    /// Total number of pages for a given page size
    pub fn total_pages(&self, page_size: u32) -> u64 {
        let page_size = u64::from(page_size.max(1));
        self.total.div_ceil(page_size)
    }
}
