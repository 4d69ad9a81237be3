//! Content composition module.
//!
//! This module provides:
//! - Registry: Zones and sections, priority ordering, render dispatch
//! - Zone: Named placement regions
//! - Section: Content blocks rendered through a display type
//! - DisplayTypeTable: Display-type labels for configuration UIs
//! - render_posts: One-shot archive listings outside any zone

pub mod archive;
pub mod display_types;
mod registry;
mod section;
mod zone;

pub use archive::{ARCHIVE_SECTION_ID, ArchiveRender, render_posts};
pub use display_types::{DisplayTypeTable, FALLBACK_DISPLAY_TYPE};
pub use registry::Registry;
pub use section::{Section, SectionOptions, SectionRef};
pub use zone::{VOID_ZONE, Zone, ZoneOptions, ZoneRef};
