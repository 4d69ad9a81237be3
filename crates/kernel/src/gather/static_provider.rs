//! In-memory query provider.
//!
//! Serves sections from a fixed list of JSON items. The main query is
//! page-aware (it follows the current request page); secondary queries
//! always read from the top of the list.

use serde_json::Value;
use tracing::debug;

use super::ItemCollection;
use crate::error::{PostViewsError, Result};
use crate::host::{QueryProvider, QueryRequest};

/// Config key restricting a section to items tagged with a category.
pub const CATEGORY_KEY: &str = "category";

/// Query provider backed by a fixed item list.
#[derive(Debug, Clone)]
pub struct StaticQueryProvider {
    items: Vec<Value>,
    page: u32,
}

impl StaticQueryProvider {
    /// Create a provider serving `items`, positioned on page 1.
    pub fn new(items: Vec<Value>) -> Self {
        Self { items, page: 1 }
    }

    /// Load items from a JSON array.
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<Value> = serde_json::from_str(json)
            .map_err(|e| PostViewsError::Query(format!("invalid item list: {e}")))?;
        Ok(Self::new(items))
    }

    /// Set the page the main query is positioned on (1-indexed).
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Number of items available.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the provider has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items matching the section's category filter, if it has one.
    fn matching<'a>(&'a self, request: &QueryRequest<'_>) -> Vec<&'a Value> {
        let category = request.config.get(CATEGORY_KEY).and_then(|v| v.as_str());

        self.items
            .iter()
            .filter(|item| match category {
                Some(wanted) => item
                    .get("categories")
                    .and_then(|c| c.as_array())
                    .is_some_and(|cats| cats.iter().any(|c| c.as_str() == Some(wanted))),
                None => true,
            })
            .collect()
    }
}

impl Default for StaticQueryProvider {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl QueryProvider for StaticQueryProvider {
    fn query(&self, request: &QueryRequest<'_>) -> Result<ItemCollection> {
        let matching = self.matching(request);
        let total = matching.len() as u64;
        let per_page = request.count;
        let page = if request.use_main_query { self.page } else { 1 };

        let offset = (page.saturating_sub(1) as usize).saturating_mul(per_page as usize);
        let items: Vec<Value> = matching
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .cloned()
            .collect();

        debug!(
            section = %request.section_id,
            main = request.use_main_query,
            page,
            returned = items.len(),
            total,
            "static query"
        );

        Ok(ItemCollection::new(items, total, page, per_page))
    }
}
