//! Theme engine and template rendering.
//!
//! Provides Tera-based section rendering with display-type template
//! suggestions and page navigation.

mod engine;

pub use engine::{PAGER_TEMPLATE, PagerLabels, SECTION_TEMPLATE, ThemeEngine};
