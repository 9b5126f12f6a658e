use super::*;

#[test]
fn clamp_unit_bounds_and_nan() {
    assert_eq!(clamp_unit(-0.25), 0.0);
    assert_eq!(clamp_unit(0.4), 0.4);
    assert_eq!(clamp_unit(1.7), 1.0);
    assert_eq!(clamp_unit(f64::NAN), 0.0);
}

#[test]
fn usable_width_rejects_degenerate_containers() {
    assert!(usable_width(Rect::new(0.0, 0.0, 0.0, 100.0)).is_err());
    assert!(usable_width(Rect::new(10.0, 0.0, 5.0, 100.0)).is_err());
    assert_eq!(usable_width(Rect::new(10.0, 0.0, 510.0, 100.0)).unwrap(), 500.0);
    assert!(!is_measurable(None));
    assert!(is_measurable(Some(Rect::new(0.0, 0.0, 1.0, 1.0))));
}

#[test]
fn offset_in_is_container_relative() {
    let container = Rect::new(100.0, 50.0, 1100.0, 650.0);
    let el = Rect::new(150.0, 90.0, 250.0, 130.0);
    assert_eq!(offset_in(el, container), Point::new(50.0, 40.0));
}

#[test]
fn zone_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Zone::Text).unwrap(), "\"text\"");
    assert_eq!(
        serde_json::from_str::<Zone>("\"media\"").unwrap(),
        Zone::Media
    );
}
