//! Registration taps.
//!
//! Taps populate a fresh registry once per run. Each tap carries a weight;
//! [`Bootstrap`] runs them in weight order (lower first), which is how zones
//! are guaranteed to exist before the sections that reference them.

mod defaults;
mod registry;

pub use defaults::{
    DefaultDisplayTypes, DefaultSections, DefaultZones, HOME_ZONE, register_display_types,
    register_sections, register_zones,
};
pub use registry::{Bootstrap, RegistrationTap, TapContext};
