//! Theme engine with Tera templates and display-type suggestion resolution.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use dashmap::DashMap;
use tera::Tera;
use tracing::debug;

use crate::error::{PostViewsError, Result};
use crate::gather::ItemCollection;
use crate::host::{DisplayRenderer, DisplayRequest, PageNavigator, Translator};

/// Template rendered when no display-type template matches.
pub const SECTION_TEMPLATE: &str = "postviews/section";

/// Template used for page navigation.
pub const PAGER_TEMPLATE: &str = "postviews/pager.html";

/// Words kept by the `excerpt` filter when no length is given.
const DEFAULT_EXCERPT_WORDS: u64 = 55;

/// Text shown in page navigation.
///
/// `page_status` may contain `{page}` and `{total}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PagerLabels {
    pub newer: String,
    pub older: String,
    pub page_status: String,
}

impl PagerLabels {
    /// English labels passed through `translator`.
    pub fn translated(translator: &dyn Translator, domain: &str) -> Self {
        let defaults = Self::default();
        Self {
            newer: translator.translate(&defaults.newer, domain),
            older: translator.translate(&defaults.older, domain),
            page_status: translator.translate(&defaults.page_status, domain),
        }
    }

    /// `page_status` with the placeholders filled in.
    pub fn status(&self, items: &ItemCollection) -> String {
        self.page_status
            .replace("{page}", &items.page.to_string())
            .replace("{total}", &items.total_pages.to_string())
    }
}

impl Default for PagerLabels {
    fn default() -> Self {
        Self {
            newer: "Newer Entries".to_string(),
            older: "Older Entries".to_string(),
            page_status: "Page {page} of {total}".to_string(),
        }
    }
}

/// Theme engine rendering sections through Tera templates.
///
/// A display type `foo` is rendered by `postviews/section--foo.html`; types
/// without such a template are unsupported and fall back to the generic
/// section template.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
    /// Cache mapping suggestion lists to resolved template names.
    suggestion_cache: DashMap<String, String>,
    /// Page navigation text.
    pager_labels: PagerLabels,
}

impl ThemeEngine {
    /// Create a new theme engine loading templates from the given directory.
    pub fn new(template_dir: &Path) -> anyhow::Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let mut tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;

        // Register custom filters
        Self::register_filters(&mut tera);

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self {
            tera,
            suggestion_cache: DashMap::new(),
            pager_labels: PagerLabels::default(),
        })
    }

    /// Create a theme engine with no templates (for testing).
    pub fn empty() -> Self {
        let mut tera = Tera::default();
        Self::register_filters(&mut tera);
        Self {
            tera,
            suggestion_cache: DashMap::new(),
            pager_labels: PagerLabels::default(),
        }
    }

    /// Replace the page navigation text.
    pub fn with_pager_labels(mut self, labels: PagerLabels) -> Self {
        self.pager_labels = labels;
        self
    }

    /// Register custom Tera filters.
    fn register_filters(tera: &mut Tera) {
        // Trim text to a number of words, marking the cut with an ellipsis
        tera.register_filter(
            "excerpt",
            |value: &tera::Value, args: &HashMap<String, tera::Value>| {
                let text = tera::try_get_value!("excerpt", "value", String, value);
                let words = args
                    .get("words")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(DEFAULT_EXCERPT_WORDS);
                let words = usize::try_from(words).unwrap_or(usize::MAX);

                let mut parts = text.split_whitespace();
                let mut excerpt = parts.by_ref().take(words).collect::<Vec<_>>().join(" ");
                if parts.next().is_some() {
                    if !excerpt.is_empty() {
                        excerpt.push(' ');
                    }
                    excerpt.push('\u{2026}');
                }

                Ok(tera::Value::String(excerpt))
            },
        );
    }

    /// Add a template from a string (replaces any template of the same name).
    pub fn add_raw_template(&mut self, name: &str, content: &str) -> Result<()> {
        self.tera.add_raw_template(name, content)?;
        self.clear_cache();
        Ok(())
    }

    /// Resolve the best template from a list of suggestions.
    ///
    /// Templates are tried in order; the first one that exists is returned.
    /// Results are cached for performance.
    ///
    /// Example suggestions: `["postviews/section--slideshow", "postviews/section"]`
    pub fn resolve_template(&self, suggestions: &[&str]) -> Option<String> {
        if suggestions.is_empty() {
            return None;
        }

        let cache_key = suggestions.join("|");

        if let Some(cached) = self.suggestion_cache.get(&cache_key) {
            return Some(cached.clone());
        }

        for suggestion in suggestions {
            let template_name = format!("{suggestion}.html");
            if self.tera.get_template(&template_name).is_ok() {
                self.suggestion_cache
                    .insert(cache_key, template_name.clone());
                return Some(template_name);
            }
        }

        // Don't cache negative results to allow hot-reload
        None
    }

    /// Template suggestions for a display type, most specific first.
    pub fn section_suggestions(display_type: &str) -> Vec<String> {
        vec![
            format!("{SECTION_TEMPLATE}--{display_type}"),
            SECTION_TEMPLATE.to_string(),
        ]
    }

    /// Clear the suggestion cache (useful for development hot-reload).
    pub fn clear_cache(&self) {
        self.suggestion_cache.clear();
    }

    /// Reload templates from disk.
    pub fn reload(&mut self) -> anyhow::Result<()> {
        self.tera
            .full_reload()
            .context("failed to reload templates")?;
        self.clear_cache();
        Ok(())
    }

    /// Page navigation markup used when the theme has no pager template.
    fn inline_page_nav(&self, items: &ItemCollection) -> String {
        let labels = &self.pager_labels;
        let mut html = String::from("<nav class=\"navigation\">");
        if items.has_prev {
            html.push_str(&format!(
                "<a class=\"prev\" href=\"?paged={}\">&laquo; {}</a>",
                items.page - 1,
                tera::escape_html(&labels.newer)
            ));
        }
        html.push_str(&format!(
            "<span class=\"page-numbers\">{}</span>",
            tera::escape_html(&labels.status(items))
        ));
        if items.has_next {
            html.push_str(&format!(
                "<a class=\"next\" href=\"?paged={}\">{} &raquo;</a>",
                items.page + 1,
                tera::escape_html(&labels.older)
            ));
        }
        html.push_str("</nav>");
        html
    }
}

impl DisplayRenderer for ThemeEngine {
    fn supports(&self, display_type: &str) -> bool {
        self.tera
            .get_template(&format!("{SECTION_TEMPLATE}--{display_type}.html"))
            .is_ok()
    }

    fn render(&self, request: &DisplayRequest<'_>, out: &mut String) -> Result<()> {
        let suggestions = Self::section_suggestions(request.display_type);
        let suggestion_refs: Vec<&str> = suggestions.iter().map(|s| s.as_str()).collect();

        let template = self.resolve_template(&suggestion_refs).ok_or_else(|| {
            PostViewsError::Render(format!(
                "no template for display type '{}'",
                request.display_type
            ))
        })?;

        let mut context = tera::Context::new();
        context.insert("display_type", request.display_type);
        context.insert("section_id", request.section_id);
        context.insert("title", &request.title);
        context.insert("items", &request.items.items);
        context.insert("query", request.items);
        context.insert("count", &request.count);
        context.insert("config", request.config);

        out.push_str(&self.tera.render(&template, &context)?);
        Ok(())
    }
}

impl PageNavigator for ThemeEngine {
    fn render_page_nav(&self, items: &ItemCollection, out: &mut String) -> Result<()> {
        if self.tera.get_template(PAGER_TEMPLATE).is_err() {
            out.push_str(&self.inline_page_nav(items));
            return Ok(());
        }

        let mut context = tera::Context::new();
        context.insert("query", items);
        context.insert("labels", &self.pager_labels);
        context.insert("page_status", &self.pager_labels.status(items));
        out.push_str(&self.tera.render(PAGER_TEMPLATE, &context)?);
        Ok(())
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("template_count", &self.tera.get_template_names().count())
            .field("cache_size", &self.suggestion_cache.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::host::CatalogTranslator;
    use serde_json::{Map, json};

    fn engine() -> ThemeEngine {
        let mut engine = ThemeEngine::empty();
        engine
            .add_raw_template(
                "postviews/section.html",
                "<ul>{% for item in items %}<li>{{ item.title }}</li>{% endfor %}</ul>",
            )
            .unwrap();
        engine
            .add_raw_template(
                "postviews/section--slideshow.html",
                "<div class=\"slides\">{{ items | length }}/{{ count }}</div>",
            )
            .unwrap();
        engine
    }

    fn request<'a>(
        display_type: &'a str,
        items: &'a ItemCollection,
        config: &'a Map<String, serde_json::Value>,
    ) -> DisplayRequest<'a> {
        DisplayRequest {
            display_type,
            section_id: "test",
            title: Some("Latest"),
            items,
            count: 3,
            config,
        }
    }

    #[test]
    fn test_section_suggestions() {
        assert_eq!(
            ThemeEngine::section_suggestions("line"),
            vec!["postviews/section--line", "postviews/section"]
        );
    }

    #[test]
    fn test_supports_only_dedicated_templates() {
        let engine = engine();
        assert!(engine.supports("slideshow"));
        assert!(!engine.supports("line"));
    }

    #[test]
    fn test_render_dedicated_template() {
        let engine = engine();
        let items = ItemCollection::new(vec![json!({"title": "A"}), json!({"title": "B"})], 2, 1, 3);
        let config = Map::new();

        let mut out = String::new();
        engine
            .render(&request("slideshow", &items, &config), &mut out)
            .unwrap();
        assert_eq!(out, "<div class=\"slides\">2/3</div>");
    }

    #[test]
    fn test_render_falls_back_to_generic_template() {
        let engine = engine();
        let items = ItemCollection::new(vec![json!({"title": "A & B"})], 1, 1, 3);
        let config = Map::new();

        let mut out = String::new();
        engine
            .render(&request("traditional", &items, &config), &mut out)
            .unwrap();
        // Autoescaped
        assert_eq!(out, "<ul><li>A &amp; B</li></ul>");
    }

    #[test]
    fn test_render_without_templates_errors() {
        let engine = ThemeEngine::empty();
        let items = ItemCollection::empty(1, 3);
        let config = Map::new();

        let mut out = String::new();
        let err = engine
            .render(&request("line", &items, &config), &mut out)
            .unwrap_err();
        assert!(matches!(err, PostViewsError::Render(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_resolve_template_cached_and_invalidated() {
        let mut engine = engine();
        assert_eq!(
            engine.resolve_template(&["postviews/section--line", "postviews/section"]),
            Some("postviews/section.html".to_string())
        );

        engine
            .add_raw_template("postviews/section--line.html", "line")
            .unwrap();
        assert_eq!(
            engine.resolve_template(&["postviews/section--line", "postviews/section"]),
            Some("postviews/section--line.html".to_string())
        );
    }

    #[test]
    fn test_inline_page_nav() {
        let engine = ThemeEngine::empty();
        let items = ItemCollection::new(vec![], 30, 2, 10);

        let mut out = String::new();
        engine.render_page_nav(&items, &mut out).unwrap();
        assert!(out.contains("Page 2 of 3"));
        assert!(out.contains("?paged=1"));
        assert!(out.contains("?paged=3"));
    }

    #[test]
    fn test_inline_page_nav_uses_translated_labels() {
        let mut catalog = CatalogTranslator::new();
        catalog.insert("ar2", "Newer Entries", "Plus récents");
        catalog.insert("ar2", "Older Entries", "Plus anciens");
        catalog.insert("ar2", "Page {page} of {total}", "Page {page} sur {total}");
        let engine =
            ThemeEngine::empty().with_pager_labels(PagerLabels::translated(&catalog, "ar2"));
        let items = ItemCollection::new(vec![], 30, 2, 10);

        let mut out = String::new();
        engine.render_page_nav(&items, &mut out).unwrap();
        assert!(out.contains("Page 2 sur 3"));
        assert!(out.contains("Plus récents"));
        assert!(out.contains("Plus anciens"));
        assert!(!out.contains("Older"));
    }

    #[test]
    fn test_pager_template_receives_labels() {
        let labels = PagerLabels {
            newer: "Prev".to_string(),
            older: "Next".to_string(),
            page_status: "{page} of {total}".to_string(),
        };
        let mut engine = ThemeEngine::empty().with_pager_labels(labels);
        engine
            .add_raw_template(
                PAGER_TEMPLATE,
                "{{ labels.newer }} {{ page_status }} {{ labels.older }}",
            )
            .unwrap();
        let items = ItemCollection::new(vec![], 30, 2, 10);

        let mut out = String::new();
        engine.render_page_nav(&items, &mut out).unwrap();
        assert_eq!(out, "Prev 2 of 3 Next");
    }

    #[test]
    fn test_pager_template() {
        let mut engine = ThemeEngine::empty();
        engine
            .add_raw_template(PAGER_TEMPLATE, "{{ query.page }}/{{ query.total_pages }}")
            .unwrap();
        let items = ItemCollection::new(vec![], 30, 1, 10);

        let mut out = String::new();
        engine.render_page_nav(&items, &mut out).unwrap();
        assert_eq!(out, "1/3");
    }

    #[test]
    fn test_excerpt_filter() {
        let mut tera = Tera::default();
        ThemeEngine::register_filters(&mut tera);

        tera.add_raw_template("test", "{{ text | excerpt(words=3) }}")
            .unwrap();
        let mut ctx = tera::Context::new();
        ctx.insert("text", "one two three four five");
        let result = tera.render("test", &ctx).unwrap();
        assert_eq!(result, "one two three \u{2026}");
    }

    #[test]
    fn test_excerpt_filter_zero_words() {
        let mut tera = Tera::default();
        ThemeEngine::register_filters(&mut tera);

        tera.add_raw_template("test", "{{ text | excerpt(words=0) }}")
            .unwrap();
        let mut ctx = tera::Context::new();
        ctx.insert("text", "one two");
        assert_eq!(tera.render("test", &ctx).unwrap(), "\u{2026}");

        ctx.insert("text", "");
        assert_eq!(tera.render("test", &ctx).unwrap(), "");
    }

    #[test]
    fn test_excerpt_filter_short_text() {
        let mut tera = Tera::default();
        ThemeEngine::register_filters(&mut tera);

        tera.add_raw_template("test", "{{ text | excerpt }}").unwrap();
        let mut ctx = tera::Context::new();
        ctx.insert("text", "short text");
        let result = tera.render("test", &ctx).unwrap();
        assert_eq!(result, "short text");
    }
}
