use std::collections::BTreeMap;

use crate::{
    anchor::tracker::Anchors,
    foundation::core::{Point, Rect, Size, clamp_unit, usable_width},
    foundation::error::OverlayResult,
    position::model::{Position, RelativePosition},
    position::zone::resolve_zone,
};

/// Pixel position (relative to the container's top-left) at which to render `position`.
///
/// Legacy absolute positions render unchanged.
pub fn to_pixels(position: &Position, anchors: &Anchors, container: Rect) -> OverlayResult<Point> {
    match position {
        Position::Absolute { x, y } => Ok(Point::new(*x, *y)),
        Position::Relative(rel) => {
            let width = usable_width(container)?;
            let zone = rel.zone(anchors.media_left_fraction);
            Ok(Point::new(
                rel.horizontal_fraction * width,
                anchors.for_zone(zone) + rel.vertical_offset,
            ))
        }
    }
}

/// Inverse of [`to_pixels`]: capture a rendered pixel position as a [`RelativePosition`].
#[tracing::instrument(skip(anchors))]
pub fn from_pixels(
    pixel_left: f64,
    pixel_top: f64,
    element_size: Size,
    container: Rect,
    anchors: &Anchors,
) -> OverlayResult<RelativePosition> {
    let width = usable_width(container)?;
    let horizontal_fraction = clamp_unit(pixel_left / width);
    let element_width_fraction = clamp_unit(element_size.width / width);
    let zone = resolve_zone(
        horizontal_fraction,
        element_width_fraction,
        anchors.media_left_fraction,
    );
    Ok(RelativePosition::new(
        horizontal_fraction,
        pixel_top - anchors.for_zone(zone),
        element_width_fraction,
    ))
}

/// Stored positions keyed by overlay element id.
///
/// Serializes as a plain JSON object so it can live inside a site document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PositionStore {
    entries: BTreeMap<String, Position>,
}

impl PositionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored position for `id`, if any.
    pub fn get(&self, id: &str) -> Option<&Position> {
        self.entries.get(id)
    }

    /// Stored position for `id`, or `default` for elements never positioned.
    pub fn get_or(&self, id: &str, default: RelativePosition) -> Position {
        self.entries
            .get(id)
            .copied()
            .unwrap_or(Position::Relative(default))
    }

    /// Overwrite the position for `id`.
    pub fn set(&mut self, id: impl Into<String>, position: Position) {
        self.entries.insert(id.into(), position);
    }

    /// Seed `id` only if nothing is stored yet. Returns `true` when seeded.
    pub fn seed_if_absent(&mut self, id: &str, position: Position) -> bool {
        if self.entries.contains_key(id) {
            return false;
        }
        self.entries.insert(id.to_string(), position);
        true
    }

    /// Forget the position for `id`, so it renders at the default again.
    pub fn reset(&mut self, id: &str) -> Option<Position> {
        self.entries.remove(id)
    }

    /// Iterate entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Position)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Mutable access for bulk rewrites such as legacy migration.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Position)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/position/store.rs"]
mod tests;
