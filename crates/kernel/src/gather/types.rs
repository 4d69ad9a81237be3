//! Item collection types returned by section queries.

use serde::{Deserialize, Serialize};

/// Items fetched for one section, with paging metadata.
///
/// Returned from every section render so callers (e.g. pagination) can
/// inspect the result after the markup has been emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCollection {
    /// Query results as JSON values.
    pub items: Vec<serde_json::Value>,

    /// Total count (before paging).
    pub total: u64,

    /// Current page number (1-indexed).
    pub page: u32,

    /// Items per page.
    pub per_page: u32,

    /// Total number of pages.
    pub total_pages: u32,

    /// Whether there's a next page.
    pub has_next: bool,

    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl ItemCollection {
    /// Create a new collection with paging calculations.
    pub fn new(items: Vec<serde_json::Value>, total: u64, page: u32, per_page: u32) -> Self {
        let total_pages = if per_page > 0 {
            u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        } else {
            1
        };

        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Create an empty collection.
    pub fn empty(page: u32, per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            per_page,
            total_pages: 0,
            has_next: false,
            has_prev: false,
        }
    }

    /// Number of pages the underlying query spans.
    pub fn max_pages(&self) -> u32 {
        self.total_pages
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
