use super::*;
use crate::geometry::provider::StaticGeometry;

fn banner() -> StaticGeometry {
    StaticGeometry::new(
        Rect::new(0.0, 100.0, 1000.0, 700.0),
        Rect::new(0.0, 100.0, 500.0, 400.0),
        Rect::new(500.0, 100.0, 1000.0, 550.0),
    )
}

#[test]
fn anchors_are_region_bottoms_minus_container_top() {
    let mut t = AnchorTracker::new(0.5);
    assert!(t.measure_now(&banner()));
    let a = t.anchors();
    assert_eq!(a.text_bottom, 300.0);
    assert_eq!(a.media_bottom, 450.0);
    assert_eq!(a.media_left_fraction, 0.5);
    assert_eq!(a.for_zone(Zone::Text), 300.0);
    assert_eq!(a.for_zone(Zone::Media), 450.0);
    assert_eq!(t.container(), banner().container);
}

#[test]
fn layout_changes_coalesce_into_one_frame_measure() {
    let mut t = AnchorTracker::new(0.5);
    let g = banner();
    assert!(!t.animation_frame(&g));

    t.layout_changed();
    t.layout_changed();
    t.layout_changed();
    assert!(t.is_pending());
    assert!(t.animation_frame(&g));
    assert!(!t.is_pending());
    // Nothing queued: no second measurement.
    assert!(!t.animation_frame(&g));
}

#[test]
fn absent_region_keeps_previous_anchor() {
    let mut t = AnchorTracker::new(0.5);
    t.measure_now(&banner());

    let mut g = banner();
    g.text = None;
    g.media = Some(Rect::new(600.0, 100.0, 1000.0, 600.0));
    t.layout_changed();
    assert!(t.animation_frame(&g));
    let a = t.anchors();
    assert_eq!(a.text_bottom, 300.0);
    assert_eq!(a.media_bottom, 500.0);
    assert_eq!(a.media_left_fraction, 0.6);
}

#[test]
fn unmeasurable_container_is_a_no_op() {
    let mut t = AnchorTracker::new(0.4);
    let mut g = banner();
    g.container = None;
    assert!(!t.measure_now(&g));
    assert_eq!(t.anchors(), Anchors::unmeasured(0.4));
    assert!(t.container().is_none());

    g.container = Some(Rect::new(0.0, 0.0, 0.0, 600.0));
    assert!(!t.measure_now(&g));
    assert!(t.container().is_none());
}

#[test]
fn unchanged_geometry_reports_no_change() {
    let mut t = AnchorTracker::new(0.5);
    let g = banner();
    assert!(t.measure_now(&g));
    assert!(!t.measure_now(&g));
}
