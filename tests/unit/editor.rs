use std::{cell::RefCell, rc::Rc, time::Duration};

use super::*;
use crate::geometry::provider::StaticGeometry;

type Log = Rc<RefCell<Vec<(String, Position)>>>;

fn banner() -> StaticGeometry {
    StaticGeometry::new(
        Rect::new(0.0, 0.0, 1000.0, 600.0),
        Rect::new(0.0, 0.0, 500.0, 300.0),
        Rect::new(500.0, 0.0, 1000.0, 450.0),
    )
}

fn editor_with_log() -> (OverlayEditor<StaticGeometry>, Log) {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    let editor = OverlayEditor::new(banner(), EngineConfig::default())
        .on_change(move |id, pos| sink.borrow_mut().push((id.to_string(), *pos)));
    (editor, log)
}

fn cta_rect() -> Rect {
    Rect::new(100.0, 320.0, 300.0, 360.0)
}

#[test]
fn drag_in_text_zone_stores_offset_from_text_anchor() {
    let (mut ed, log) = editor_with_log();
    assert!(ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect()));
    assert_eq!(ed.pointer_move(Point::new(170.0, 340.0)), Some(Point::new(120.0, 330.0)));

    let EditorEvent::Committed { id, position } =
        ed.pointer_up(Point::new(200.0, 350.0), Instant::now())
    else {
        panic!("expected commit");
    };
    assert_eq!(id, "cta");
    assert!((position.horizontal_fraction - 0.15).abs() < 1e-12);
    assert!((position.element_width_fraction - 0.2).abs() < 1e-12);
    assert_eq!(position.vertical_offset, 40.0);

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0], ("cta".to_string(), Position::Relative(position)));
    assert_eq!(ed.positions().get("cta"), Some(&Position::Relative(position)));
}

#[test]
fn short_press_clicks_without_touching_stored_position() {
    let stored = Position::Relative(RelativePosition::new(0.6, -25.0, 0.2));
    let mut positions = PositionStore::new();
    positions.set("cta", stored);
    let (ed, log) = editor_with_log();
    let mut ed = ed.with_positions(positions);

    ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect());
    ed.pointer_move(Point::new(153.0, 334.0));
    let ev = ed.pointer_up(Point::new(153.0, 334.0), Instant::now());

    assert_eq!(ev, EditorEvent::Click { id: "cta".into() });
    assert_eq!(ed.positions().get("cta"), Some(&stored));
    assert!(log.borrow().is_empty());
}

#[test]
fn long_drag_never_reports_a_click() {
    let (mut ed, _log) = editor_with_log();
    ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect());
    let ev = ed.pointer_up(Point::new(157.0, 330.0), Instant::now());
    assert!(matches!(ev, EditorEvent::Committed { .. }));
}

#[test]
fn first_click_seeds_from_rendered_bounds() {
    let (mut ed, log) = editor_with_log();
    assert!(ed.positions().is_empty());
    ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect());
    ed.pointer_up(Point::new(150.0, 330.0), Instant::now());

    let seeded = *ed.positions().get("cta").unwrap();
    let rel = seeded.as_relative().unwrap();
    assert!((rel.horizontal_fraction - 0.1).abs() < 1e-12);
    assert_eq!(rel.vertical_offset, 20.0);
    let p = ed.placement("cta").unwrap();
    assert!((p.x - 100.0).abs() < 1e-9);
    assert_eq!(p.y, 320.0);
    assert!(log.borrow().is_empty());
}

#[test]
fn dragging_past_the_right_edge_right_aligns() {
    let (mut ed, _log) = editor_with_log();
    ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect());
    ed.pointer_move(Point::new(10_000.0, 330.0));
    let EditorEvent::Committed { position, .. } =
        ed.pointer_up(Point::new(10_000.0, 330.0), Instant::now())
    else {
        panic!("expected commit");
    };
    let expected = 1.0 - position.element_width_fraction;
    assert!((position.horizontal_fraction - expected).abs() < 1e-12);
    assert!((position.horizontal_fraction - 0.8).abs() < 1e-12);
    assert!(position.horizontal_fraction + position.element_width_fraction <= 1.0 + 1e-12);
}

#[test]
fn stored_position_scales_with_container_width() {
    let (mut ed, _log) = editor_with_log();
    ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect());
    ed.pointer_up(Point::new(200.0, 350.0), Instant::now());
    let wide = ed.placement("cta").unwrap();
    assert!((wide.x - 150.0).abs() < 1e-9);

    *ed.geometry_mut() = banner().with_container_width(500.0);
    ed.layout_changed();
    ed.animation_frame();

    let narrow = ed.placement("cta").unwrap();
    assert!((narrow.x - 75.0).abs() < 1e-9);
    assert_eq!(narrow.y, wide.y);
}

#[test]
fn anchor_change_moves_dependent_elements() {
    let (mut ed, _log) = editor_with_log();
    ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect());
    ed.pointer_up(Point::new(200.0, 350.0), Instant::now());

    // Text grows by 60px.
    ed.geometry_mut().text = Some(Rect::new(0.0, 0.0, 500.0, 360.0));
    ed.layout_changed();
    assert!(ed.animation_frame());
    assert_eq!(ed.placement("cta").unwrap().y, 400.0);
}

#[test]
fn placement_follows_the_live_drag() {
    let (mut ed, _log) = editor_with_log();
    ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect());
    ed.pointer_move(Point::new(250.0, 330.0));
    assert_eq!(ed.placement("cta"), Some(Point::new(200.0, 320.0)));
    assert_eq!(ed.drag_phase(), DragPhase::Active);
}

#[test]
fn read_only_mode_ignores_pointer() {
    let (mut ed, _log) = editor_with_log();
    ed.set_editable(false);
    assert!(!ed.is_editable());
    assert!(!ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect()));
    assert_eq!(ed.pointer_move(Point::new(400.0, 330.0)), None);
    assert_eq!(ed.pointer_up(Point::new(400.0, 330.0), Instant::now()), EditorEvent::None);
}

#[test]
fn unmounted_container_blocks_interaction() {
    let mut ed = OverlayEditor::new(StaticGeometry::default(), EngineConfig::default());
    assert!(ed.placement("cta").is_none());
    assert!(!ed.pointer_down("cta", Point::new(1.0, 1.0), cta_rect()));
}

#[test]
fn reset_restores_default_and_notifies() {
    let default = RelativePosition::new(0.05, 24.0, 0.0);
    let (ed, log) = editor_with_log();
    let mut ed = ed.with_default_position(default);
    ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect());
    ed.pointer_up(Point::new(300.0, 330.0), Instant::now());
    assert!(ed.positions().get("cta").is_some());

    assert!(ed.reset_position("cta").is_some());
    assert!(ed.positions().get("cta").is_none());
    assert_eq!(
        log.borrow().last(),
        Some(&("cta".to_string(), Position::Relative(default)))
    );
    let p = ed.placement("cta").unwrap();
    assert!((p.x - 50.0).abs() < 1e-9);
    assert_eq!(p.y, 324.0);
}

#[test]
fn click_right_after_drag_is_suppressed() {
    let (mut ed, _log) = editor_with_log();
    let t0 = Instant::now();
    ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect());
    ed.pointer_up(Point::new(250.0, 330.0), t0);
    assert!(ed.suppresses_click(t0 + Duration::from_millis(10)));
    assert!(!ed.suppresses_click(t0 + Duration::from_millis(150)));
}

#[test]
fn reset_of_unstored_element_is_silent() {
    let (mut ed, log) = editor_with_log();
    assert!(ed.reset_position("cta").is_none());
    assert!(log.borrow().is_empty());
}

#[test]
fn diagonal_release_past_threshold_is_a_drag() {
    let (mut ed, log) = editor_with_log();
    ed.pointer_down("cta", Point::new(150.0, 330.0), cta_rect());
    // 4px on each axis is under the threshold per axis but ~5.66px in total.
    let ev = ed.pointer_up(Point::new(154.0, 334.0), Instant::now());
    assert!(matches!(ev, EditorEvent::Committed { .. }));
    assert_eq!(log.borrow().len(), 1);
}
