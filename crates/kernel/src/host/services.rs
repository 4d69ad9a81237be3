//! Collaborator traits for rendering, querying, and option lookup.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::gather::ItemCollection;

/// Option key holding the host's default page size.
pub const POSTS_PER_PAGE: &str = "posts_per_page";

/// Page size used when the option store has no usable value.
pub const DEFAULT_POSTS_PER_PAGE: u32 = 10;

/// Read-only access to host options.
pub trait OptionStore {
    /// Look up a raw option value.
    fn get_option(&self, key: &str) -> Option<Value>;

    /// The host's configured page size.
    ///
    /// Accepts a number or a numeric string. Missing, non-numeric, or zero
    /// values fall back to [`DEFAULT_POSTS_PER_PAGE`].
    fn posts_per_page(&self) -> u32 {
        self.get_option(POSTS_PER_PAGE)
            .and_then(|v| match v {
                Value::String(s) => s.trim().parse::<u64>().ok(),
                other => other.as_u64(),
            })
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_POSTS_PER_PAGE)
    }
}

/// Everything a display-type renderer receives for one section.
#[derive(Debug, Clone, Copy)]
pub struct DisplayRequest<'a> {
    /// Resolved display type (after fallback).
    pub display_type: &'a str,
    /// Id of the section being rendered.
    pub section_id: &'a str,
    /// Heading shown above the section, if any.
    pub title: Option<&'a str>,
    /// Items fetched for the section.
    pub items: &'a ItemCollection,
    /// Number of items the section asked for.
    pub count: u32,
    /// Extra section options, forwarded verbatim.
    pub config: &'a Map<String, Value>,
}

/// Emits markup for a section according to its display type.
pub trait DisplayRenderer {
    /// Whether this renderer has a dedicated strategy for `display_type`.
    ///
    /// Sections whose type is not supported are rendered with the generic
    /// post list instead.
    fn supports(&self, display_type: &str) -> bool;

    /// Render a section into `out`.
    fn render(&self, request: &DisplayRequest<'_>, out: &mut String) -> Result<()>;
}

/// Parameters for fetching a section's items.
#[derive(Debug, Clone, Copy)]
pub struct QueryRequest<'a> {
    /// Id of the section asking for items.
    pub section_id: &'a str,
    /// Number of items wanted.
    pub count: u32,
    /// Drive the page's primary query rather than a secondary one.
    pub use_main_query: bool,
    /// Extra section options (e.g. a category filter).
    pub config: &'a Map<String, Value>,
}

/// Fetches items for sections.
pub trait QueryProvider {
    /// Run a query for one section.
    fn query(&self, request: &QueryRequest<'_>) -> Result<ItemCollection>;
}

/// Renders pagination links below a listing.
pub trait PageNavigator {
    /// Render page navigation for `items` into `out`.
    fn render_page_nav(&self, items: &ItemCollection, out: &mut String) -> Result<()>;
}
