use crate::foundation::core::Zone;

/// Decide which column an element belongs to.
///
/// An element is in the text zone only when its right edge lies strictly left
/// of the media column. Pure, so the zone chosen when a drag ends is the zone
/// used when the stored position is rendered again.
pub fn resolve_zone(
    horizontal_fraction: f64,
    element_width_fraction: f64,
    media_left_fraction: f64,
) -> Zone {
    let right_edge = horizontal_fraction + element_width_fraction;
    if right_edge < media_left_fraction {
        Zone::Text
    } else {
        Zone::Media
    }
}

#[cfg(test)]
#[path = "../../tests/unit/position/zone.rs"]
mod tests;
