//! Tap registry - orders registration taps and runs them once.

use tracing::{debug, error, info, warn};

use crate::content::Registry;
use crate::error::Result;
use crate::host::Translator;

/// Services available to a registration tap.
#[derive(Clone, Copy)]
pub struct TapContext<'a> {
    /// Translator for user-facing labels.
    pub translator: &'a dyn Translator,
    /// Text domain passed to the translator.
    pub domain: &'a str,
}

impl<'a> TapContext<'a> {
    /// Create a new tap context.
    pub fn new(translator: &'a dyn Translator, domain: &'a str) -> Self {
        Self { translator, domain }
    }

    /// Translate a label in this context's domain.
    pub fn t(&self, text: &str) -> String {
        self.translator.translate(text, self.domain)
    }
}

/// A unit of registration work run during bootstrap.
pub trait RegistrationTap {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Weight for ordering (lower = runs earlier).
    fn weight(&self) -> i32 {
        0
    }

    /// Add zones, sections, or display types to `registry`.
    fn register(&self, registry: &mut Registry, ctx: TapContext<'_>) -> Result<()>;
}

/// Ordered set of registration taps, run at most once.
///
/// A failing tap is logged and skipped so the remaining taps still run.
pub struct Bootstrap {
    taps: Vec<Box<dyn RegistrationTap>>,
    completed: bool,
}

impl Bootstrap {
    /// Create a bootstrap with no taps.
    pub fn new() -> Self {
        Self {
            taps: Vec::new(),
            completed: false,
        }
    }

    /// Create a bootstrap with the default zones, display types, and sections.
    pub fn with_defaults() -> Self {
        let mut bootstrap = Self::new();
        bootstrap.add(super::DefaultZones);
        bootstrap.add(super::DefaultDisplayTypes);
        bootstrap.add(super::DefaultSections);
        bootstrap
    }

    /// Add a tap. Taps with equal weight run in the order they were added.
    pub fn add(&mut self, tap: impl RegistrationTap + 'static) {
        self.taps.push(Box::new(tap));
        self.taps.sort_by_key(|t| t.weight());
    }

    /// Names of the registered taps, in run order.
    pub fn tap_names(&self) -> Vec<&str> {
        self.taps.iter().map(|t| t.name()).collect()
    }

    /// Whether [`Bootstrap::run`] has already completed.
    pub fn has_run(&self) -> bool {
        self.completed
    }

    /// Run every tap against `registry`.
    ///
    /// Returns `false` without doing anything if the bootstrap already ran.
    pub fn run(&mut self, registry: &mut Registry, ctx: TapContext<'_>) -> bool {
        if self.completed {
            warn!("registration already ran, ignoring");
            return false;
        }

        let mut failed = 0;
        for tap in &self.taps {
            match tap.register(registry, ctx) {
                Ok(()) => debug!(tap = %tap.name(), weight = tap.weight(), "tap registered"),
                Err(e) => {
                    failed += 1;
                    error!(tap = %tap.name(), error = %e, "registration tap failed");
                }
            }
        }

        self.completed = true;
        info!(
            taps = self.taps.len(),
            failed,
            zones = registry.zones().len(),
            sections = registry.section_count(),
            "registration complete"
        );
        true
    }
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("taps", &self.tap_names())
            .field("completed", &self.completed)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::{Section, SectionOptions, Zone, ZoneOptions};
    use crate::host::IdentityTranslator;

    struct AddZone(&'static str, i32);

    impl RegistrationTap for AddZone {
        fn name(&self) -> &str {
            self.0
        }

        fn weight(&self) -> i32 {
            self.1
        }

        fn register(&self, registry: &mut Registry, _ctx: TapContext<'_>) -> Result<()> {
            registry.add_zone(Zone::new(self.0, ZoneOptions::default()));
            Ok(())
        }
    }

    struct AddSection(&'static str, &'static str);

    impl RegistrationTap for AddSection {
        fn name(&self) -> &str {
            self.0
        }

        fn register(&self, registry: &mut Registry, _ctx: TapContext<'_>) -> Result<()> {
            registry.add_section(Section::new(self.0, Some(self.1), SectionOptions::default()))?;
            Ok(())
        }
    }

    fn ctx() -> TapContext<'static> {
        TapContext::new(&IdentityTranslator, "ar2")
    }

    #[test]
    fn taps_run_in_weight_order() {
        let mut bootstrap = Bootstrap::new();
        // Added before its zone, but the zone tap weighs less
        bootstrap.add(AddSection("news", "sidebar"));
        bootstrap.add(AddZone("sidebar", -10));

        assert_eq!(bootstrap.tap_names(), vec!["sidebar", "news"]);

        let mut registry = Registry::new();
        assert!(bootstrap.run(&mut registry, ctx()));
        assert!(registry.get_section("news").is_some());
    }

    #[test]
    fn failing_tap_does_not_stop_others() {
        let mut bootstrap = Bootstrap::new();
        bootstrap.add(AddSection("orphan", "nowhere"));
        bootstrap.add(AddZone("home", 5));

        let mut registry = Registry::new();
        assert!(bootstrap.run(&mut registry, ctx()));
        assert!(registry.get_section("orphan").is_none());
        assert!(registry.get_zone("home").is_some());
    }

    #[test]
    fn bootstrap_runs_once() {
        let mut bootstrap = Bootstrap::new();
        bootstrap.add(AddZone("home", 0));

        let mut registry = Registry::new();
        assert!(!bootstrap.has_run());
        assert!(bootstrap.run(&mut registry, ctx()));
        assert!(bootstrap.has_run());

        registry.remove_zone("home");
        assert!(!bootstrap.run(&mut registry, ctx()));
        assert!(registry.get_zone("home").is_none());
    }

    #[test]
    fn defaults_order_zones_first() {
        let bootstrap = Bootstrap::with_defaults();
        assert_eq!(
            bootstrap.tap_names(),
            vec!["default_zones", "default_display_types", "default_sections"]
        );
    }
}
