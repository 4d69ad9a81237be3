//! Host services consumed by the registry.
//!
//! The kernel never talks to a template engine, a database, or a string
//! catalog directly. Everything outside the registry is reached through the
//! narrow traits defined here, bundled per request in a [`RenderContext`].

mod request_context;
mod services;
mod translate;

pub use request_context::RenderContext;
pub use services::{
    DEFAULT_POSTS_PER_PAGE, DisplayRenderer, DisplayRequest, OptionStore, POSTS_PER_PAGE,
    PageNavigator, QueryProvider, QueryRequest,
};
pub use translate::{CatalogTranslator, IdentityTranslator, Translator};
