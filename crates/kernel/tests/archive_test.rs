#![allow(clippy::unwrap_used, clippy::expect_used)]
//! One-shot archive rendering tests.

use postviews_kernel::content::ARCHIVE_SECTION_ID;
use postviews_kernel::{Registry, SectionOptions, VOID_ZONE, render_posts};
use postviews_test_utils::TestHost;

#[test]
fn test_archive_defaults() {
    let host = TestHost::new().with_posts_per_page(8);

    let mut out = String::new();
    let archive = render_posts(host.ctx(), SectionOptions::default(), false, &mut out);

    assert_eq!(archive.section.id(), ARCHIVE_SECTION_ID);
    assert_eq!(archive.section.zone_id(), VOID_ZONE);
    assert_eq!(archive.section.display_type, "traditional");
    assert!(archive.section.title.is_none());
    assert!(archive.section.use_query_posts);

    let call = &host.renderer.calls()[0];
    assert_eq!(call.display_type, "traditional");
    assert_eq!(call.count, 8);
    assert!(!archive.nav_rendered);
}

#[test]
fn test_archive_is_not_registered() {
    let registry = Registry::new();
    let host = TestHost::new();

    let mut out = String::new();
    render_posts(host.ctx(), SectionOptions::default(), false, &mut out);

    assert!(registry.get_section(ARCHIVE_SECTION_ID).is_none());
    assert_eq!(registry.section_count(), 0);
}

#[test]
fn test_archive_nav_with_multiple_pages() {
    let host = TestHost::new().with_pages(3);

    let mut out = String::new();
    let archive = render_posts(host.ctx(), SectionOptions::default(), true, &mut out);

    assert_eq!(archive.items.as_ref().unwrap().max_pages(), 3);
    assert!(archive.nav_rendered);
    assert_eq!(host.pager.call_count(), 1);
    assert!(out.ends_with("<nav>1/3</nav>"));
}

#[test]
fn test_archive_nav_skipped_for_single_page() {
    let host = TestHost::new().with_pages(1);

    let mut out = String::new();
    let archive = render_posts(host.ctx(), SectionOptions::default(), true, &mut out);

    assert!(!archive.nav_rendered);
    assert_eq!(host.pager.call_count(), 0);
}

#[test]
fn test_archive_nav_not_requested() {
    let host = TestHost::new().with_pages(5);

    let mut out = String::new();
    render_posts(host.ctx(), SectionOptions::default(), false, &mut out);

    assert_eq!(host.pager.call_count(), 0);
}

#[test]
fn test_archive_disabled_renders_nothing() {
    let host = TestHost::new().with_pages(5);

    let mut out = String::new();
    let archive = render_posts(
        host.ctx(),
        SectionOptions::default().with_enabled(false),
        true,
        &mut out,
    );

    assert!(archive.items.is_none());
    assert_eq!(host.renderer.call_count(), 0);
    assert_eq!(host.pager.call_count(), 0);
    assert!(out.is_empty());
}

#[test]
fn test_archive_options_from_loose_map() {
    let mut args = serde_json::Map::new();
    args.insert("type".to_string(), serde_json::json!("line"));
    args.insert("count".to_string(), serde_json::json!(2));
    args.insert("title".to_string(), serde_json::json!("Search Results"));
    let host = TestHost::new();

    let mut out = String::new();
    let archive = render_posts(
        host.ctx(),
        SectionOptions::from_map(args).unwrap(),
        false,
        &mut out,
    );

    assert_eq!(archive.section.display_type, "line");
    let call = &host.renderer.calls()[0];
    assert_eq!(call.count, 2);
    assert_eq!(call.title.as_deref(), Some("Search Results"));
}
