//! Zones: named placement regions that group sections.

use serde::{Deserialize, Serialize};

use super::{Registry, Section};
use crate::host::RenderContext;

/// Id of the sentinel zone every registry carries.
///
/// Sections created without a meaningful placement (e.g. one-off archive
/// listings) belong here. It never shows up in admin surfaces.
pub const VOID_ZONE: &str = "_void";

/// Options accepted when creating a zone. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneOptions {
    /// Human-readable label.
    pub label: String,
    /// Longer description for admin UIs.
    pub description: String,
    /// List the zone on the theme options screen.
    pub show_in_theme_options: bool,
    /// List the zone in the live customizer.
    #[serde(alias = "show_in_customize")]
    pub show_in_customizer: bool,
    /// Zone ships with the theme.
    #[serde(alias = "_builtin")]
    pub builtin: bool,
    /// Owned by the host; carried through untouched.
    pub persistent: Option<bool>,
}

/// A placement region.
///
/// A zone does not hold its sections. Membership is derived from each
/// section's zone id, so [`Zone::sections`] and [`Zone::render`] always
/// reflect the registry's current contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    id: String,
    pub label: String,
    pub description: String,
    pub show_in_theme_options: bool,
    pub show_in_customizer: bool,
    pub builtin: bool,
    pub persistent: Option<bool>,
}

impl Zone {
    /// Create a zone from options.
    pub fn new(id: impl Into<String>, options: ZoneOptions) -> Self {
        Self {
            id: id.into(),
            label: options.label,
            description: options.description,
            show_in_theme_options: options.show_in_theme_options,
            show_in_customizer: options.show_in_customizer,
            builtin: options.builtin,
            persistent: options.persistent,
        }
    }

    /// The sentinel zone, hidden from every admin surface.
    pub fn void() -> Self {
        Self::new(VOID_ZONE, ZoneOptions::default())
    }

    /// Zone id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether this is the sentinel zone.
    pub fn is_void(&self) -> bool {
        self.id == VOID_ZONE
    }

    /// Sections in this zone, in render order.
    pub fn sections<'r>(&self, registry: &'r Registry) -> Vec<&'r Section> {
        registry.sections_in_zone(&self.id)
    }

    /// Render every enabled section in this zone, in priority order.
    ///
    /// Returns the number of sections that produced output.
    pub fn render(&self, registry: &Registry, ctx: RenderContext<'_>, out: &mut String) -> usize {
        registry.render_sections_of(&self.id, ctx, out)
    }
}

/// A zone given either by id or as an entity.
#[derive(Debug, Clone, Copy)]
pub enum ZoneRef<'a> {
    Id(&'a str),
    Zone(&'a Zone),
}

impl ZoneRef<'_> {
    /// Id of the referenced zone.
    pub fn id(&self) -> &str {
        match self {
            ZoneRef::Id(id) => id,
            ZoneRef::Zone(zone) => zone.id(),
        }
    }
}

impl<'a> From<&'a str> for ZoneRef<'a> {
    fn from(id: &'a str) -> Self {
        ZoneRef::Id(id)
    }
}

impl<'a> From<&'a String> for ZoneRef<'a> {
    fn from(id: &'a String) -> Self {
        ZoneRef::Id(id.as_str())
    }
}

impl<'a> From<&'a Zone> for ZoneRef<'a> {
    fn from(zone: &'a Zone) -> Self {
        ZoneRef::Zone(zone)
    }
}
