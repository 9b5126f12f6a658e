use crate::foundation::error::{OverlayError, OverlayResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Which reference column an overlay element belongs to.
///
/// The zone decides which anchor the element's vertical offset is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Entirely left of the media block; offset is relative to the text bottom.
    Text,
    /// Overlapping or right of the media block; offset is relative to the media bottom.
    Media,
}

/// Clamp a fraction into `[0, 1]`. NaN maps to `0`.
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Width of a container usable as a fraction denominator.
pub(crate) fn usable_width(container: Rect) -> OverlayResult<f64> {
    let w = container.width();
    if !w.is_finite() || w <= 0.0 {
        return Err(OverlayError::geometry(format!(
            "container width must be > 0 (got {w})"
        )));
    }
    Ok(w)
}

/// Returns `true` when a measured container can drive positioning.
pub(crate) fn is_measurable(container: Option<Rect>) -> bool {
    container.is_some_and(|c| usable_width(c).is_ok())
}

/// Top-left of `rect` expressed relative to the top-left of `container`.
pub(crate) fn offset_in(rect: Rect, container: Rect) -> Point {
    Point::new(rect.x0 - container.x0, rect.y0 - container.y0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
