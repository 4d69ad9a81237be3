//! One-shot rendering of post listings outside any zone.
//!
//! Archive, search, and category pages list posts without a registered
//! section. [`render_posts`] builds a throwaway section from caller options,
//! renders it immediately, and optionally adds page navigation.

use tracing::{debug, error};

use super::section::{Section, SectionOptions};
use crate::gather::ItemCollection;
use crate::host::RenderContext;

/// Id given to the throwaway archive section.
pub const ARCHIVE_SECTION_ID: &str = "archive-posts";

/// Outcome of a one-shot archive render.
#[derive(Debug, Clone)]
pub struct ArchiveRender {
    /// The unregistered section that was rendered.
    pub section: Section,
    /// Items fetched, or `None` when nothing rendered.
    pub items: Option<ItemCollection>,
    /// Whether page navigation was emitted.
    pub nav_rendered: bool,
}

/// Render a listing from `options` (unset keys take the section defaults:
/// traditional display, host page size, main query, enabled).
///
/// When `show_nav` is set and the query spans more than one page, the page
/// navigator runs once after the listing.
pub fn render_posts(
    ctx: RenderContext<'_>,
    options: SectionOptions,
    show_nav: bool,
    out: &mut String,
) -> ArchiveRender {
    let section = Section::new(ARCHIVE_SECTION_ID, None, options);
    let items = section.render(ctx, out);

    let mut nav_rendered = false;
    if show_nav && let Some(items) = items.as_ref().filter(|i| i.max_pages() > 1) {
        let mut nav = String::new();
        match ctx.pager.render_page_nav(items, &mut nav) {
            Ok(()) => {
                out.push_str(&nav);
                nav_rendered = true;
            }
            Err(e) => error!(error = %e, "page navigation render failed"),
        }
    }

    debug!(
        display_type = %section.display_type,
        pages = items.as_ref().map_or(0, ItemCollection::max_pages),
        nav_rendered,
        "archive rendered"
    );

    ArchiveRender {
        section,
        items,
        nav_rendered,
    }
}
