//! Per-request bundle of host services.

use super::{DisplayRenderer, OptionStore, PageNavigator, QueryProvider};

/// Services a render call needs, borrowed for the duration of one request.
///
/// The context is cheap to copy; pass it by value into render calls.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Per-display-type markup renderer.
    pub renderer: &'a dyn DisplayRenderer,
    /// Item query provider.
    pub queries: &'a dyn QueryProvider,
    /// Pagination renderer used by the archive helper.
    pub pager: &'a dyn PageNavigator,
    /// Host options (page size).
    pub options: &'a dyn OptionStore,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(
        renderer: &'a dyn DisplayRenderer,
        queries: &'a dyn QueryProvider,
        pager: &'a dyn PageNavigator,
        options: &'a dyn OptionStore,
    ) -> Self {
        Self {
            renderer,
            queries,
            pager,
            options,
        }
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("posts_per_page", &self.options.posts_per_page())
            .finish_non_exhaustive()
    }
}
