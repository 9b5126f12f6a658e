use crate::{
    anchor::tracker::Anchors,
    foundation::core::{Rect, Size, Zone, clamp_unit},
    foundation::error::{OverlayError, OverlayResult},
    position::{store::from_pixels, zone::resolve_zone},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", from = "RelativeFields")]
/// Resolution-independent position of one overlay element.
///
/// Horizontal placement is a fraction of container width; vertical placement
/// is a pixel offset from the anchor of the element's zone. The element's
/// width fraction is captured when the drag ends so the zone can be
/// recomputed later without measuring the element again.
pub struct RelativePosition {
    /// Left edge as a fraction of container width, in `[0, 1]`.
    pub horizontal_fraction: f64,
    /// Top edge in pixels relative to the zone's anchor.
    pub vertical_offset: f64,
    /// Element width as a fraction of container width, in `[0, 1]`.
    pub element_width_fraction: f64,
}

impl RelativePosition {
    /// Build a position; both fractions are clamped to `[0, 1]`.
    pub fn new(horizontal_fraction: f64, vertical_offset: f64, element_width_fraction: f64) -> Self {
        Self {
            horizontal_fraction: clamp_unit(horizontal_fraction),
            vertical_offset: if vertical_offset.is_finite() {
                vertical_offset
            } else {
                0.0
            },
            element_width_fraction: clamp_unit(element_width_fraction),
        }
    }

    /// Zone this position belongs to for the given media left edge.
    pub fn zone(&self, media_left_fraction: f64) -> Zone {
        resolve_zone(
            self.horizontal_fraction,
            self.element_width_fraction,
            media_left_fraction,
        )
    }
}

/// Wire shape of [`RelativePosition`]; every decoded value goes through
/// [`RelativePosition::new`] so out-of-range fractions never reach the engine.
#[derive(serde::Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RelativeFields {
    horizontal_fraction: f64,
    vertical_offset: f64,
    element_width_fraction: f64,
}

impl From<RelativeFields> for RelativePosition {
    fn from(f: RelativeFields) -> Self {
        Self::new(f.horizontal_fraction, f.vertical_offset, f.element_width_fraction)
    }
}

const RELATIVE_KEYS: [&str; 3] = [
    "horizontalFraction",
    "verticalOffset",
    "elementWidthFraction",
];

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
/// A stored position in either the legacy or the current scheme.
///
/// Both serialize to their historical JSON shape: `{"x":..,"y":..}` for
/// [`Position::Absolute`] and `{"horizontalFraction":..,..}` for
/// [`Position::Relative`]. Only relative positions are ever written by the
/// engine; absolute ones are read for rendering and migrated on demand.
pub enum Position {
    /// Legacy pixel offset from the container's top-left corner.
    Absolute {
        /// Left offset in pixels.
        x: f64,
        /// Top offset in pixels.
        y: f64,
    },
    /// Current fractional scheme.
    Relative(RelativePosition),
}

impl Default for Position {
    fn default() -> Self {
        Self::Relative(RelativePosition::default())
    }
}

impl From<RelativePosition> for Position {
    fn from(value: RelativePosition) -> Self {
        Self::Relative(value)
    }
}

impl Position {
    /// Classify a raw configuration value.
    ///
    /// Any of the fractional keys selects the current scheme (missing ones
    /// default to `0`); otherwise numeric `x` and `y` select the legacy scheme.
    pub fn from_value(value: &serde_json::Value) -> OverlayResult<Self> {
        let Some(obj) = value.as_object() else {
            return Err(OverlayError::serde("position must be a JSON object"));
        };

        if RELATIVE_KEYS.iter().any(|k| obj.contains_key(*k)) {
            let mut fields = serde_json::Map::new();
            for key in RELATIVE_KEYS {
                if let Some(v) = obj.get(key) {
                    fields.insert(key.to_string(), v.clone());
                }
            }
            let rel: RelativePosition = serde_json::from_value(serde_json::Value::Object(fields))?;
            return Ok(Self::Relative(rel));
        }

        match (
            obj.get("x").and_then(serde_json::Value::as_f64),
            obj.get("y").and_then(serde_json::Value::as_f64),
        ) {
            (Some(x), Some(y)) => Ok(Self::Absolute { x, y }),
            _ => Err(OverlayError::serde(
                "position needs either fractional fields or numeric x and y",
            )),
        }
    }

    /// `true` for the legacy pixel scheme.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Absolute { .. })
    }

    /// The relative form, if already migrated.
    pub fn as_relative(&self) -> Option<&RelativePosition> {
        match self {
            Self::Relative(rel) => Some(rel),
            Self::Absolute { .. } => None,
        }
    }

    /// One-way migration to the fractional scheme using current geometry.
    pub fn into_relative(
        self,
        element_size: Size,
        container: Rect,
        anchors: &Anchors,
    ) -> OverlayResult<RelativePosition> {
        match self {
            Self::Relative(rel) => Ok(rel),
            Self::Absolute { x, y } => from_pixels(x, y, element_size, container, anchors),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/position/model.rs"]
mod tests;
