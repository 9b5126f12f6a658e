use crate::{
    foundation::core::{Rect, Zone, clamp_unit, usable_width},
    geometry::provider::GeometryProvider,
};

/// Vertical baselines (pixels from the container top) plus the media column's left edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchors {
    /// Bottom edge of the text column relative to the container top.
    pub text_bottom: f64,
    /// Bottom edge of the media column relative to the container top.
    pub media_bottom: f64,
    /// Left edge of the media column as a fraction of container width.
    pub media_left_fraction: f64,
}

impl Anchors {
    /// Anchors before anything has been measured.
    pub fn unmeasured(media_left_fraction: f64) -> Self {
        Self {
            text_bottom: 0.0,
            media_bottom: 0.0,
            media_left_fraction: clamp_unit(media_left_fraction),
        }
    }

    /// Baseline used for elements in `zone`.
    pub fn for_zone(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Text => self.text_bottom,
            Zone::Media => self.media_bottom,
        }
    }
}

/// Keeps [`Anchors`] current as the host reports layout changes.
///
/// The host calls [`AnchorTracker::layout_changed`] from its resize observers
/// and [`AnchorTracker::animation_frame`] once per frame; remeasurement only
/// happens on the frame after a change, so a burst of resize events costs one
/// measurement.
#[derive(Clone, Debug)]
pub struct AnchorTracker {
    anchors: Anchors,
    container: Option<Rect>,
    pending: bool,
}

impl AnchorTracker {
    /// New tracker; `media_left_fraction` is the fallback until the media column is seen.
    pub fn new(media_left_fraction: f64) -> Self {
        Self {
            anchors: Anchors::unmeasured(media_left_fraction),
            container: None,
            pending: false,
        }
    }

    /// Current anchors.
    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    /// Last successfully measured container bounds.
    pub fn container(&self) -> Option<Rect> {
        self.container
    }

    /// Whether a remeasure is queued for the next frame.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Container, text column or media column changed size.
    pub fn layout_changed(&mut self) {
        self.pending = true;
    }

    /// Frame callback. Runs a queued measurement; returns `true` if any anchor moved.
    pub fn animation_frame<G: GeometryProvider + ?Sized>(&mut self, geometry: &G) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.measure_now(geometry)
    }

    /// Measure immediately, bypassing the frame debounce. Returns `true` if any anchor moved.
    #[tracing::instrument(skip(self, geometry))]
    pub fn measure_now<G: GeometryProvider + ?Sized>(&mut self, geometry: &G) -> bool {
        let Some(container) = geometry.container_bounds() else {
            tracing::debug!("container not mounted; anchors unchanged");
            return false;
        };
        let Ok(width) = usable_width(container) else {
            tracing::debug!(?container, "container has no width; anchors unchanged");
            return false;
        };

        let before = self.anchors;
        if let Some(text) = geometry.text_region_bounds() {
            self.anchors.text_bottom = text.y1 - container.y0;
        }
        if let Some(media) = geometry.media_region_bounds() {
            self.anchors.media_bottom = media.y1 - container.y0;
            self.anchors.media_left_fraction = clamp_unit((media.x0 - container.x0) / width);
        }
        self.container = Some(container);

        let changed = before != self.anchors;
        if changed {
            tracing::debug!(anchors = ?self.anchors, "anchors updated");
        }
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anchor/tracker.rs"]
mod tests;
