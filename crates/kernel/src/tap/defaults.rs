//! Default content: the sentinel and home zones, the built-in display
//! types, and the four home-page sections.

use super::{RegistrationTap, TapContext};
use crate::content::{Registry, Section, SectionOptions, VOID_ZONE, Zone, ZoneOptions};
use crate::error::Result;

/// Id of the front-page zone.
pub const HOME_ZONE: &str = "home";

/// Register the sentinel zone and the home zone.
pub fn register_zones(registry: &mut Registry, ctx: TapContext<'_>) {
    registry.add_zone(Zone::void());

    registry.add_zone(Zone::new(
        HOME_ZONE,
        ZoneOptions {
            label: ctx.t("Home"),
            description: ctx.t(
                "Handles all content being displayed in the front page (excluding the slideshow).",
            ),
            show_in_theme_options: true,
            show_in_customizer: true,
            builtin: true,
            persistent: None,
        },
    ));
}

/// Register the display types the default sections use.
pub fn register_display_types(registry: &mut Registry, ctx: TapContext<'_>) {
    registry.register_display_type("traditional", ctx.t("Default (Traditional)"));
    registry.register_display_type("node", ctx.t("Node Based"));
    registry.register_display_type("quick", ctx.t("Quick Preview"));
    registry.register_display_type("line", ctx.t("Per Line"));
    registry.register_display_type("slideshow", ctx.t("Slideshow"));
}

/// Register the default home-page sections.
///
/// Fails if the home zone has not been registered.
pub fn register_sections(registry: &mut Registry, ctx: TapContext<'_>) -> Result<()> {
    let home = Some(HOME_ZONE);

    registry.add_section(Section::new(
        "slideshow",
        home,
        SectionOptions::default()
            .with_label(ctx.t("Slideshow"))
            .with_title(ctx.t("Slideshow"))
            .with_display_type("slideshow")
            .with_count(3)
            .with_priority(5)
            .with_extra("display_types", vec!["slideshow"]),
    ))?;

    registry.add_section(Section::new(
        "featured-posts-1",
        home,
        SectionOptions::default()
            .with_label(ctx.t("Featured Posts #1"))
            .with_title(ctx.t("Featured Posts"))
            .with_display_type("node")
            .with_count(3)
            .with_priority(4),
    ))?;

    registry.add_section(Section::new(
        "featured-posts-2",
        home,
        SectionOptions::default()
            .with_label(ctx.t("Featured Posts #2"))
            .with_title(ctx.t("Editors' Picks"))
            .with_display_type("quick")
            .with_count(3)
            .with_priority(3),
    ))?;

    // Count left unset: follows the host page size
    registry.add_section(Section::new(
        "news-posts",
        home,
        SectionOptions::default()
            .with_label(ctx.t("News Posts"))
            .with_title(ctx.t("Latest News"))
            .with_display_type("line")
            .with_query_posts(true)
            .with_priority(2),
    ))?;

    Ok(())
}

/// Tap registering [`register_zones`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultZones;

impl RegistrationTap for DefaultZones {
    fn name(&self) -> &str {
        "default_zones"
    }

    fn weight(&self) -> i32 {
        -10
    }

    fn register(&self, registry: &mut Registry, ctx: TapContext<'_>) -> Result<()> {
        register_zones(registry, ctx);
        Ok(())
    }
}

/// Tap registering [`register_display_types`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDisplayTypes;

impl RegistrationTap for DefaultDisplayTypes {
    fn name(&self) -> &str {
        "default_display_types"
    }

    fn weight(&self) -> i32 {
        -5
    }

    fn register(&self, registry: &mut Registry, ctx: TapContext<'_>) -> Result<()> {
        register_display_types(registry, ctx);
        Ok(())
    }
}

/// Tap registering [`register_sections`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSections;

impl RegistrationTap for DefaultSections {
    fn name(&self) -> &str {
        "default_sections"
    }

    fn register(&self, registry: &mut Registry, ctx: TapContext<'_>) -> Result<()> {
        register_sections(registry, ctx)
    }
}
