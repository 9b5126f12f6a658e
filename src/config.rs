use crate::foundation::error::{OverlayError, OverlayResult};

/// Tunables for drag handling and anchor fallback.
///
/// Every field has a serde default, so `{}` deserializes to [`EngineConfig::default`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Movement (per axis, in pixels) a press must exceed before it becomes a drag.
    #[serde(default = "default_drag_threshold_px")]
    pub drag_threshold_px: f64,
    /// How long after a drag ends a trailing click on the same element is suppressed.
    #[serde(default = "default_click_suppress_ms")]
    pub click_suppress_ms: u64,
    /// Vertical freedom relative to where the drag started.
    #[serde(default)]
    pub vertical_clamp: VerticalClamp,
    /// Media left edge (fraction of container width) assumed before the media region is measured.
    #[serde(default = "default_media_left_fraction")]
    pub default_media_left_fraction: f64,
}

/// Vertical drag range, in pixels relative to the drag start.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VerticalClamp {
    /// Furthest upward movement (negative).
    #[serde(default = "default_vertical_min_px")]
    pub min_px: f64,
    /// Furthest downward movement.
    #[serde(default = "default_vertical_max_px")]
    pub max_px: f64,
}

impl Default for VerticalClamp {
    fn default() -> Self {
        Self {
            min_px: default_vertical_min_px(),
            max_px: default_vertical_max_px(),
        }
    }
}

impl VerticalClamp {
    /// Clamp a vertical drag delta into range.
    pub fn apply(self, dy: f64) -> f64 {
        dy.clamp(self.min_px, self.max_px)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: default_drag_threshold_px(),
            click_suppress_ms: default_click_suppress_ms(),
            vertical_clamp: VerticalClamp::default(),
            default_media_left_fraction: default_media_left_fraction(),
        }
    }
}

fn default_drag_threshold_px() -> f64 {
    5.0
}

fn default_click_suppress_ms() -> u64 {
    100
}

fn default_vertical_min_px() -> f64 {
    -400.0
}

fn default_vertical_max_px() -> f64 {
    200.0
}

fn default_media_left_fraction() -> f64 {
    0.5
}

impl EngineConfig {
    /// Check ranges; call after deserializing untrusted JSON.
    pub fn validate(&self) -> OverlayResult<()> {
        if !self.drag_threshold_px.is_finite() || self.drag_threshold_px < 0.0 {
            return Err(OverlayError::validation(
                "drag_threshold_px must be finite and >= 0",
            ));
        }
        let vc = self.vertical_clamp;
        if !vc.min_px.is_finite() || !vc.max_px.is_finite() {
            return Err(OverlayError::validation("vertical_clamp must be finite"));
        }
        if vc.min_px > vc.max_px {
            return Err(OverlayError::validation(format!(
                "vertical_clamp min_px ({}) must be <= max_px ({})",
                vc.min_px, vc.max_px
            )));
        }
        if !(0.0..=1.0).contains(&self.default_media_left_fraction) {
            return Err(OverlayError::validation(
                "default_media_left_fraction must be in [0, 1]",
            ));
        }
        Ok(())
    }

    pub(crate) fn click_suppress(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.click_suppress_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
