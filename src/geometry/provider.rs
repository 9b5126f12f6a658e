use crate::foundation::core::Rect;

/// Source of live layout measurements.
///
/// All rectangles share one coordinate space (typically the viewport). `None`
/// means the region is not mounted yet. Implementations are expected to be
/// cheap; the engine calls them from pointer and frame callbacks.
pub trait GeometryProvider {
    /// Bounds of the common parent the overlay elements are positioned in.
    fn container_bounds(&self) -> Option<Rect>;
    /// Bounds of the text column.
    fn text_region_bounds(&self) -> Option<Rect>;
    /// Bounds of the media column.
    fn media_region_bounds(&self) -> Option<Rect>;
}

impl<T: GeometryProvider + ?Sized> GeometryProvider for &T {
    fn container_bounds(&self) -> Option<Rect> {
        (**self).container_bounds()
    }

    fn text_region_bounds(&self) -> Option<Rect> {
        (**self).text_region_bounds()
    }

    fn media_region_bounds(&self) -> Option<Rect> {
        (**self).media_region_bounds()
    }
}

impl<T: GeometryProvider + ?Sized> GeometryProvider for Box<T> {
    fn container_bounds(&self) -> Option<Rect> {
        (**self).container_bounds()
    }

    fn text_region_bounds(&self) -> Option<Rect> {
        (**self).text_region_bounds()
    }

    fn media_region_bounds(&self) -> Option<Rect> {
        (**self).media_region_bounds()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Pushed measurements, for hosts that measure elsewhere and for tests.
pub struct StaticGeometry {
    /// Container bounds, if mounted.
    #[serde(default)]
    pub container: Option<Rect>,
    /// Text column bounds, if mounted.
    #[serde(default)]
    pub text: Option<Rect>,
    /// Media column bounds, if mounted.
    #[serde(default)]
    pub media: Option<Rect>,
}

impl StaticGeometry {
    /// Geometry with all three regions mounted.
    pub fn new(container: Rect, text: Rect, media: Rect) -> Self {
        Self {
            container: Some(container),
            text: Some(text),
            media: Some(media),
        }
    }

    /// Same layout with every x coordinate scaled about the container's left edge.
    ///
    /// Models a horizontal viewport resize where column widths stay proportional
    /// and heights do not change.
    pub fn scaled_horizontally(&self, factor: f64) -> Self {
        let origin = self.container.map_or(0.0, |c| c.x0);
        let scale = |r: Rect| {
            Rect::new(
                origin + (r.x0 - origin) * factor,
                r.y0,
                origin + (r.x1 - origin) * factor,
                r.y1,
            )
        };
        Self {
            container: self.container.map(scale),
            text: self.text.map(scale),
            media: self.media.map(scale),
        }
    }

    /// Scale so the container ends up `width` pixels wide. No-op when unmounted.
    pub fn with_container_width(&self, width: f64) -> Self {
        match self.container {
            Some(c) if c.width() > 0.0 => self.scaled_horizontally(width / c.width()),
            _ => *self,
        }
    }
}

impl GeometryProvider for StaticGeometry {
    fn container_bounds(&self) -> Option<Rect> {
        self.container
    }

    fn text_region_bounds(&self) -> Option<Rect> {
        self.text
    }

    fn media_region_bounds(&self) -> Option<Rect> {
        self.media
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/provider.rs"]
mod tests;
