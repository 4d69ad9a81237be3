//! PostViews Kernel Library
//!
//! Zones, sections, and display types for composing content pages. The
//! `postviews` binary is a thin driver over this library.

pub mod config;
pub mod content;
pub mod error;
pub mod gather;
pub mod host;
pub mod tap;
pub mod theme;

pub use config::Config;
pub use content::{
    ArchiveRender, DisplayTypeTable, Registry, Section, SectionOptions, SectionRef, VOID_ZONE,
    Zone, ZoneOptions, ZoneRef, render_posts,
};
pub use error::{PostViewsError, Result};
pub use gather::{ItemCollection, StaticQueryProvider};
pub use host::{
    CatalogTranslator, DisplayRenderer, DisplayRequest, IdentityTranslator, OptionStore,
    PageNavigator, QueryProvider, QueryRequest, RenderContext, Translator,
};
pub use tap::{Bootstrap, RegistrationTap, TapContext};
pub use theme::{PagerLabels, ThemeEngine};
