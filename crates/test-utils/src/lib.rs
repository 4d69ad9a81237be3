//! PostViews test utilities.
//!
//! Recording collaborators for integration tests: a renderer that logs every
//! call, a query provider with a fixed page count, a counting pager, and an
//! option store with a fixed page size.

use std::collections::HashSet;

use parking_lot::Mutex;
use serde_json::{Map, Value as JsonValue, json};

use postviews_kernel::{
    DisplayRenderer, DisplayRequest, ItemCollection, OptionStore, PageNavigator, PostViewsError,
    QueryProvider, QueryRequest, RenderContext, Result,
};

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub section_id: String,
    pub display_type: String,
    pub title: Option<String>,
    pub count: u32,
    pub item_count: usize,
    pub config: Map<String, JsonValue>,
}

/// Renderer that records every call and writes `<section id="...">`.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    supported: Option<HashSet<String>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<RenderCall>>,
}

impl RecordingRenderer {
    /// A renderer that supports every display type.
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that supports only the given display types.
    pub fn supporting(types: &[&str]) -> Self {
        Self {
            supported: Some(types.iter().map(|t| (*t).to_string()).collect()),
            ..Self::default()
        }
    }

    /// Make rendering fail for a section.
    pub fn failing_on(mut self, section_id: &str) -> Self {
        self.failing.insert(section_id.to_string());
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    /// Section ids rendered, in order.
    pub fn rendered_ids(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.section_id.clone()).collect()
    }

    /// Number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl DisplayRenderer for RecordingRenderer {
    fn supports(&self, display_type: &str) -> bool {
        self.supported
            .as_ref()
            .is_none_or(|types| types.contains(display_type))
    }

    fn render(&self, request: &DisplayRequest<'_>, out: &mut String) -> Result<()> {
        if self.failing.contains(request.section_id) {
            return Err(PostViewsError::Render(format!(
                "{} is configured to fail",
                request.section_id
            )));
        }

        self.calls.lock().push(RenderCall {
            section_id: request.section_id.to_string(),
            display_type: request.display_type.to_string(),
            title: request.title.map(str::to_string),
            count: request.count,
            item_count: request.items.len(),
            config: request.config.clone(),
        });
        out.push_str(&format!(
            "<section id=\"{}\" class=\"{}\"></section>",
            request.section_id, request.display_type
        ));
        Ok(())
    }
}

/// Query provider returning `count` generated items and a fixed page count.
#[derive(Debug)]
pub struct FixedQueryProvider {
    pages: u32,
    requests: Mutex<Vec<(String, u32, bool)>>,
}

impl FixedQueryProvider {
    /// Every query reports `pages` pages.
    pub fn with_pages(pages: u32) -> Self {
        Self {
            pages,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Recorded `(section_id, count, use_main_query)` requests.
    pub fn requests(&self) -> Vec<(String, u32, bool)> {
        self.requests.lock().clone()
    }
}

impl Default for FixedQueryProvider {
    fn default() -> Self {
        Self::with_pages(1)
    }
}

impl QueryProvider for FixedQueryProvider {
    fn query(&self, request: &QueryRequest<'_>) -> Result<ItemCollection> {
        self.requests.lock().push((
            request.section_id.to_string(),
            request.count,
            request.use_main_query,
        ));

        let items = (1..=request.count)
            .map(|i| json!({"id": i, "title": format!("{} #{i}", request.section_id)}))
            .collect();
        let total = u64::from(request.count) * u64::from(self.pages);
        Ok(ItemCollection::new(items, total, 1, request.count))
    }
}

/// Pager that counts invocations.
#[derive(Debug, Default)]
pub struct CountingPager {
    calls: Mutex<usize>,
}

impl CountingPager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times page navigation was rendered.
    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

impl PageNavigator for CountingPager {
    fn render_page_nav(&self, items: &ItemCollection, out: &mut String) -> Result<()> {
        *self.calls.lock() += 1;
        out.push_str(&format!("<nav>{}/{}</nav>", items.page, items.total_pages));
        Ok(())
    }
}

/// Option store with a fixed page size.
#[derive(Debug, Clone, Copy)]
pub struct StaticOptions {
    pub posts_per_page: u32,
}

impl Default for StaticOptions {
    fn default() -> Self {
        Self { posts_per_page: 10 }
    }
}

impl OptionStore for StaticOptions {
    fn get_option(&self, key: &str) -> Option<JsonValue> {
        (key == "posts_per_page").then(|| json!(self.posts_per_page))
    }
}

/// Bundle of recording collaborators.
#[derive(Debug, Default)]
pub struct TestHost {
    pub renderer: RecordingRenderer,
    pub queries: FixedQueryProvider,
    pub pager: CountingPager,
    pub options: StaticOptions,
}

impl TestHost {
    /// Host whose renderer supports every display type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the renderer.
    pub fn with_renderer(mut self, renderer: RecordingRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Make every query report `pages` pages.
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.queries = FixedQueryProvider::with_pages(pages);
        self
    }

    /// Set the host page size.
    pub fn with_posts_per_page(mut self, posts_per_page: u32) -> Self {
        self.options = StaticOptions { posts_per_page };
        self
    }

    /// Borrow the collaborators as a render context.
    pub fn ctx(&self) -> RenderContext<'_> {
        RenderContext::new(&self.renderer, &self.queries, &self.pager, &self.options)
    }
}
