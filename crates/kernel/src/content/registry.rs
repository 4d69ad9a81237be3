//! Zone and section registry.
//!
//! The registry owns every zone and section for one run, links sections to
//! zones, computes each zone's render order, and dispatches renders. It is an
//! ordinary value: build one per request (or per process), hand it to the
//! page renderer by reference, and drop it when done.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::display_types::DisplayTypeTable;
use super::section::{Section, SectionRef};
use super::zone::{VOID_ZONE, Zone, ZoneRef};
use crate::error::{PostViewsError, Result};
use crate::gather::ItemCollection;
use crate::host::RenderContext;

/// A stored section plus its registration sequence number.
///
/// The sequence keeps equal-priority sections in registration order.
#[derive(Debug, Clone)]
struct Entry {
    section: Section,
    seq: u64,
}

/// Registry of zones, sections, and display types.
#[derive(Debug)]
pub struct Registry {
    zones: HashMap<String, Zone>,
    sections: HashMap<String, Entry>,
    display_types: DisplayTypeTable,
    next_seq: u64,
}

impl Registry {
    /// Create a registry holding only the sentinel zone.
    pub fn new() -> Self {
        let mut zones = HashMap::new();
        zones.insert(VOID_ZONE.to_string(), Zone::void());

        Self {
            zones,
            sections: HashMap::new(),
            display_types: DisplayTypeTable::new(),
            next_seq: 0,
        }
    }

    // -------------------------------------------------------------------
    // Zones
    // -------------------------------------------------------------------

    /// Add a zone, replacing any zone with the same id.
    ///
    /// Returns the replaced zone, if any. A replacement sentinel zone is
    /// stripped of its admin flags.
    pub fn add_zone(&mut self, mut zone: Zone) -> Option<Zone> {
        if zone.is_void()
            && (zone.show_in_theme_options || zone.show_in_customizer || zone.builtin)
        {
            warn!("sentinel zone cannot be shown in admin surfaces, clearing flags");
            zone.show_in_theme_options = false;
            zone.show_in_customizer = false;
            zone.builtin = false;
        }
        debug!(zone = %zone.id(), "zone added");
        self.zones.insert(zone.id().to_string(), zone)
    }

    /// Get a zone by id.
    pub fn get_zone(&self, id: &str) -> Option<&Zone> {
        self.zones.get(id)
    }

    /// Remove a zone.
    ///
    /// Sections placed in the zone stay registered but are no longer
    /// reachable through zone rendering. The sentinel zone cannot be removed.
    pub fn remove_zone(&mut self, id: &str) -> Option<Zone> {
        if id == VOID_ZONE {
            warn!("refusing to remove the sentinel zone");
            return None;
        }
        self.zones.remove(id)
    }

    /// All zones, sorted by id.
    pub fn zones(&self) -> Vec<&Zone> {
        let mut zones: Vec<_> = self.zones.values().collect();
        zones.sort_by(|a, b| a.id().cmp(b.id()));
        zones
    }

    /// Zones an admin UI should list on the theme options screen.
    pub fn theme_option_zones(&self) -> Vec<&Zone> {
        self.zones()
            .into_iter()
            .filter(|z| z.show_in_theme_options && !z.is_void())
            .collect()
    }

    /// Zones an admin UI should list in the customizer.
    pub fn customizer_zones(&self) -> Vec<&Zone> {
        self.zones()
            .into_iter()
            .filter(|z| z.show_in_customizer && !z.is_void())
            .collect()
    }

    /// Render a zone given by id or entity.
    ///
    /// Unknown ids render nothing. Returns the number of sections that
    /// produced output.
    pub fn render_zone<'z>(
        &self,
        zone: impl Into<ZoneRef<'z>>,
        ctx: RenderContext<'_>,
        out: &mut String,
    ) -> usize {
        match zone.into() {
            ZoneRef::Zone(zone) => zone.render(self, ctx, out),
            ZoneRef::Id(id) => match self.zones.get(id) {
                Some(zone) => zone.render(self, ctx, out),
                None => {
                    debug!(zone = %id, "zone not found, nothing to render");
                    0
                }
            },
        }
    }

    /// Render the sections placed in `zone_id`, in priority order.
    pub(crate) fn render_sections_of(
        &self,
        zone_id: &str,
        ctx: RenderContext<'_>,
        out: &mut String,
    ) -> usize {
        let sections = self.sections_in_zone(zone_id);
        let rendered = sections
            .iter()
            .filter(|s| s.render(ctx, out).is_some())
            .count();

        debug!(
            zone = %zone_id,
            sections = sections.len(),
            rendered,
            "zone rendered"
        );
        rendered
    }

    // -------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------

    /// Add a section, replacing any section with the same id.
    ///
    /// The section's zone must already be registered. A replaced section
    /// keeps its original registration position for tie-breaking.
    pub fn add_section(&mut self, section: Section) -> Result<Option<Section>> {
        if !self.zones.contains_key(section.zone_id()) {
            warn!(
                section = %section.id(),
                zone = %section.zone_id(),
                "section targets unknown zone"
            );
            return Err(PostViewsError::UnknownZone {
                section: section.id().to_string(),
                zone: section.zone_id().to_string(),
            });
        }

        let seq = match self.sections.get(section.id()) {
            Some(existing) => existing.seq,
            None => {
                self.next_seq += 1;
                self.next_seq
            }
        };

        debug!(
            section = %section.id(),
            zone = %section.zone_id(),
            priority = section.priority,
            "section added"
        );

        let previous = self
            .sections
            .insert(section.id().to_string(), Entry { section, seq });
        Ok(previous.map(|e| e.section))
    }

    /// Get a section by id.
    pub fn get_section(&self, id: &str) -> Option<&Section> {
        self.sections.get(id).map(|e| &e.section)
    }

    /// Get a section by id for in-place changes (e.g. toggling `enabled`).
    pub fn get_section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.get_mut(id).map(|e| &mut e.section)
    }

    /// Remove a section.
    pub fn remove_section(&mut self, id: &str) -> Option<Section> {
        self.sections.remove(id).map(|e| e.section)
    }

    /// Sections placed in `zone_id`, lowest priority first.
    ///
    /// Equal priorities keep registration order.
    pub fn sections_in_zone(&self, zone_id: &str) -> Vec<&Section> {
        let mut entries: Vec<&Entry> = self
            .sections
            .values()
            .filter(|e| e.section.zone_id() == zone_id)
            .collect();
        entries.sort_by_key(|e| (e.section.priority, e.seq));
        entries.into_iter().map(|e| &e.section).collect()
    }

    /// Render a section given by id or entity.
    ///
    /// Unknown ids render nothing. Returns the items the section fetched.
    pub fn render_section<'s>(
        &self,
        section: impl Into<SectionRef<'s>>,
        ctx: RenderContext<'_>,
        out: &mut String,
    ) -> Option<ItemCollection> {
        match section.into() {
            SectionRef::Section(section) => section.render(ctx, out),
            SectionRef::Id(id) => match self.get_section(id) {
                Some(section) => section.render(ctx, out),
                None => {
                    debug!(section = %id, "section not found, nothing to render");
                    None
                }
            },
        }
    }

    /// Number of registered sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    // -------------------------------------------------------------------
    // Display types
    // -------------------------------------------------------------------

    /// Registered display types.
    pub fn display_types(&self) -> &DisplayTypeTable {
        &self.display_types
    }

    /// Register a display type, replacing any existing label.
    pub fn register_display_type(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.display_types.register(id, label);
    }

    /// Unregister a display type. Absent ids are ignored.
    pub fn unregister_display_type(&mut self, id: &str) {
        self.display_types.unregister(id);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
