//! Sections: renderable content blocks placed in a zone.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error};

use super::display_types::FALLBACK_DISPLAY_TYPE;
use super::zone::VOID_ZONE;
use crate::gather::ItemCollection;
use crate::host::{DisplayRequest, OptionStore, QueryRequest, RenderContext};

/// Options accepted when creating a section.
///
/// Keys other than the recognised ones land in `extra` and are handed to the
/// display renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionOptions {
    /// Label shown in admin UIs.
    #[serde(default)]
    pub label: String,
    /// Heading rendered above the section.
    #[serde(default)]
    pub title: Option<String>,
    /// Display type id.
    #[serde(rename = "type", default = "default_display_type")]
    pub display_type: String,
    /// Items to fetch; `None` means the host's page size.
    #[serde(default)]
    pub count: Option<u32>,
    /// Render rank within the zone (lower first).
    #[serde(default)]
    pub priority: i32,
    /// Disabled sections render nothing.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Drive the page's main query instead of a secondary one.
    #[serde(default = "default_true")]
    pub use_query_posts: bool,
    /// Owned by the host; carried through untouched.
    #[serde(default)]
    pub persistent: bool,
    /// Everything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_true() -> bool {
    true
}
fn default_display_type() -> String {
    FALLBACK_DISPLAY_TYPE.to_string()
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            label: String::new(),
            title: None,
            display_type: default_display_type(),
            count: None,
            priority: 0,
            enabled: true,
            use_query_posts: true,
            persistent: false,
            extra: Map::new(),
        }
    }
}

impl SectionOptions {
    /// Parse options from a loose key/value map, filling in defaults for
    /// every missing key.
    pub fn from_map(map: Map<String, Value>) -> serde_json::Result<Self> {
        serde_json::from_value(Value::Object(map))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_display_type(mut self, display_type: impl Into<String>) -> Self {
        self.display_type = display_type.into();
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_query_posts(mut self, use_query_posts: bool) -> Self {
        self.use_query_posts = use_query_posts;
        self
    }

    /// Add an extra option forwarded to the renderer.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A content block.
///
/// The owning zone is fixed at construction; moving a section means
/// creating a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    id: String,
    zone: String,
    pub display_type: String,
    pub label: String,
    pub title: Option<String>,
    pub count: Option<u32>,
    pub priority: i32,
    pub enabled: bool,
    pub use_query_posts: bool,
    pub persistent: bool,
    pub config: Map<String, Value>,
}

impl Section {
    /// Create a section. A missing zone places it in the sentinel zone.
    pub fn new(id: impl Into<String>, zone: Option<&str>, options: SectionOptions) -> Self {
        Self {
            id: id.into(),
            zone: zone.unwrap_or(VOID_ZONE).to_string(),
            display_type: options.display_type,
            label: options.label,
            title: options.title,
            count: options.count,
            priority: options.priority,
            enabled: options.enabled,
            use_query_posts: options.use_query_posts,
            persistent: options.persistent,
            config: options.extra,
        }
    }

    /// Section id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the owning zone.
    pub fn zone_id(&self) -> &str {
        &self.zone
    }

    /// Number of items to fetch, resolving "host default" via `options`.
    pub fn effective_count(&self, options: &dyn OptionStore) -> u32 {
        self.count.unwrap_or_else(|| options.posts_per_page())
    }

    /// Render this section into `out`.
    ///
    /// Returns the fetched items so callers can inspect paging metadata, or
    /// `None` when nothing was rendered (disabled section, failed query, or
    /// failed render). Failures are logged, never propagated, and leave
    /// `out` untouched.
    pub fn render(&self, ctx: RenderContext<'_>, out: &mut String) -> Option<ItemCollection> {
        if !self.enabled {
            debug!(section = %self.id, "section disabled, skipping");
            return None;
        }

        let display_type = if ctx.renderer.supports(&self.display_type) {
            self.display_type.as_str()
        } else {
            debug!(
                section = %self.id,
                display_type = %self.display_type,
                fallback = FALLBACK_DISPLAY_TYPE,
                "unsupported display type, using fallback"
            );
            FALLBACK_DISPLAY_TYPE
        };

        let count = self.effective_count(ctx.options);

        let items = match ctx.queries.query(&QueryRequest {
            section_id: &self.id,
            count,
            use_main_query: self.use_query_posts,
            config: &self.config,
        }) {
            Ok(items) => items,
            Err(e) => {
                error!(section = %self.id, error = %e, "section query failed");
                return None;
            }
        };

        let request = DisplayRequest {
            display_type,
            section_id: &self.id,
            title: self.title.as_deref(),
            items: &items,
            count,
            config: &self.config,
        };

        let mut html = String::new();
        if let Err(e) = ctx.renderer.render(&request, &mut html) {
            error!(
                section = %self.id,
                display_type,
                error = %e,
                "section render failed"
            );
            return None;
        }
        out.push_str(&html);

        debug!(section = %self.id, display_type, items = items.len(), "section rendered");
        Some(items)
    }
}

/// A section given either by id or as an entity.
#[derive(Debug, Clone, Copy)]
pub enum SectionRef<'a> {
    Id(&'a str),
    Section(&'a Section),
}

impl SectionRef<'_> {
    /// Id of the referenced section.
    pub fn id(&self) -> &str {
        match self {
            SectionRef::Id(id) => id,
            SectionRef::Section(section) => section.id(),
        }
    }
}

impl<'a> From<&'a str> for SectionRef<'a> {
    fn from(id: &'a str) -> Self {
        SectionRef::Id(id)
    }
}

impl<'a> From<&'a String> for SectionRef<'a> {
    fn from(id: &'a String) -> Self {
        SectionRef::Id(id.as_str())
    }
}

impl<'a> From<&'a Section> for SectionRef<'a> {
    fn from(section: &'a Section) -> Self {
        SectionRef::Section(section)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::{PostViewsError, Result};
    use crate::host::{DisplayRenderer, PageNavigator, QueryProvider};
    use serde_json::json;
    use std::cell::RefCell;

    /// Renderer that writes `[type:id]` and remembers what it saw.
    #[derive(Default)]
    struct TagRenderer {
        supported: Vec<&'static str>,
        seen: RefCell<Vec<(String, u32)>>,
        fail: bool,
    }

    impl DisplayRenderer for TagRenderer {
        fn supports(&self, display_type: &str) -> bool {
            self.supported.contains(&display_type)
        }

        fn render(&self, request: &DisplayRequest<'_>, out: &mut String) -> Result<()> {
            out.push_str("partial");
            if self.fail {
                return Err(PostViewsError::Render("boom".to_string()));
            }
            self.seen
                .borrow_mut()
                .push((request.display_type.to_string(), request.count));
            out.push_str(&format!("[{}:{}]", request.display_type, request.section_id));
            Ok(())
        }
    }

    struct Pages(u32);

    impl QueryProvider for Pages {
        fn query(&self, request: &QueryRequest<'_>) -> Result<ItemCollection> {
            Ok(ItemCollection::new(
                vec![json!({"id": 1})],
                u64::from(request.count) * u64::from(self.0),
                1,
                request.count,
            ))
        }
    }

    struct Broken;

    impl QueryProvider for Broken {
        fn query(&self, _request: &QueryRequest<'_>) -> Result<ItemCollection> {
            Err(PostViewsError::Query("database gone".to_string()))
        }
    }

    struct NoNav;

    impl PageNavigator for NoNav {
        fn render_page_nav(&self, _items: &ItemCollection, _out: &mut String) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn options_default_to_traditional_enabled_main_query() {
        let options = SectionOptions::default();
        assert_eq!(options.display_type, "traditional");
        assert!(options.enabled);
        assert!(options.use_query_posts);
        assert!(!options.persistent);
        assert!(options.count.is_none());
        assert_eq!(options.priority, 0);
    }

    #[test]
    fn options_collect_unknown_keys() {
        let mut map = Map::new();
        map.insert("type".to_string(), json!("slideshow"));
        map.insert("count".to_string(), json!(3));
        map.insert("display_types".to_string(), json!(["slideshow"]));

        let options = SectionOptions::from_map(map).unwrap();

        assert_eq!(options.display_type, "slideshow");
        assert_eq!(options.count, Some(3));
        assert!(options.enabled);
        assert_eq!(options.extra.get("display_types"), Some(&json!(["slideshow"])));
        assert!(!options.extra.contains_key("type"));
    }

    #[test]
    fn missing_zone_means_void() {
        let section = Section::new("archive-posts", None, SectionOptions::default());
        assert_eq!(section.zone_id(), VOID_ZONE);
    }

    #[test]
    fn effective_count_uses_host_page_size() {
        let config = Config {
            posts_per_page: 12,
            ..Config::default()
        };
        let section = Section::new("a", None, SectionOptions::default());
        assert_eq!(section.effective_count(&config), 12);

        let section = Section::new("b", None, SectionOptions::default().with_count(3));
        assert_eq!(section.effective_count(&config), 3);
    }

    #[test]
    fn render_uses_supported_type() {
        let renderer = TagRenderer {
            supported: vec!["slideshow"],
            ..Default::default()
        };
        let config = Config::default();
        let ctx = RenderContext::new(&renderer, &Pages(1), &NoNav, &config);
        let section = Section::new(
            "slideshow",
            Some("home"),
            SectionOptions::default()
                .with_display_type("slideshow")
                .with_count(3),
        );

        let mut out = String::new();
        let items = section.render(ctx, &mut out);

        assert!(items.is_some());
        assert!(out.ends_with("[slideshow:slideshow]"));
        assert_eq!(renderer.seen.borrow()[0], ("slideshow".to_string(), 3));
    }

    #[test]
    fn render_falls_back_for_unknown_type() {
        let renderer = TagRenderer::default();
        let config = Config::default();
        let ctx = RenderContext::new(&renderer, &Pages(1), &NoNav, &config);
        let section = Section::new(
            "grid",
            None,
            SectionOptions::default().with_display_type("mosaic"),
        );

        let mut out = String::new();
        section.render(ctx, &mut out);

        assert_eq!(renderer.seen.borrow()[0].0, FALLBACK_DISPLAY_TYPE);
        // The section keeps its declared type
        assert_eq!(section.display_type, "mosaic");
    }

    #[test]
    fn disabled_section_renders_nothing() {
        let renderer = TagRenderer::default();
        let config = Config::default();
        let ctx = RenderContext::new(&renderer, &Pages(1), &NoNav, &config);
        let section = Section::new("off", None, SectionOptions::default().with_enabled(false));

        let mut out = String::new();
        assert!(section.render(ctx, &mut out).is_none());
        assert!(out.is_empty());
        assert!(renderer.seen.borrow().is_empty());
    }

    #[test]
    fn query_failure_renders_nothing() {
        let renderer = TagRenderer::default();
        let config = Config::default();
        let ctx = RenderContext::new(&renderer, &Broken, &NoNav, &config);
        let section = Section::new("news", None, SectionOptions::default());

        let mut out = String::new();
        assert!(section.render(ctx, &mut out).is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn render_failure_discards_partial_output() {
        let renderer = TagRenderer {
            fail: true,
            ..Default::default()
        };
        let config = Config::default();
        let ctx = RenderContext::new(&renderer, &Pages(1), &NoNav, &config);
        let section = Section::new("news", None, SectionOptions::default());

        let mut out = String::from("before");
        assert!(section.render(ctx, &mut out).is_none());
        assert_eq!(out, "before");
    }

    #[test]
    fn render_returns_paging_metadata() {
        let renderer = TagRenderer::default();
        let config = Config::default();
        let ctx = RenderContext::new(&renderer, &Pages(3), &NoNav, &config);
        let section = Section::new("archive", None, SectionOptions::default());

        let mut out = String::new();
        let items = section.render(ctx, &mut out).unwrap();
        assert_eq!(items.max_pages(), 3);
    }
}
