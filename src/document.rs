use std::collections::BTreeMap;

use crate::{
    anchor::tracker::AnchorTracker,
    config::EngineConfig,
    foundation::core::{Size, is_measurable},
    foundation::error::{OverlayError, OverlayResult},
    geometry::provider::GeometryProvider,
    position::model::{Position, RelativePosition},
    position::store::PositionStore,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// The positioning section of a site configuration document.
///
/// This is the JSON value a host stores and hands back; the engine never
/// persists it itself.
pub struct OverlayDocument {
    /// Engine tunables.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Position for elements with nothing stored.
    #[serde(default)]
    pub default_position: RelativePosition,
    /// Stored positions keyed by element id.
    #[serde(default)]
    pub elements: PositionStore,
}

impl OverlayDocument {
    /// Parse and validate.
    pub fn from_json_str(s: &str) -> OverlayResult<Self> {
        let doc: Self = serde_json::from_str(s)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Pretty JSON.
    pub fn to_json_string_pretty(&self) -> OverlayResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate engine settings and stored values.
    pub fn validate(&self) -> OverlayResult<()> {
        self.engine.validate()?;
        let d = &self.default_position;
        if !(0.0..=1.0).contains(&d.horizontal_fraction)
            || !(0.0..=1.0).contains(&d.element_width_fraction)
            || !d.vertical_offset.is_finite()
        {
            return Err(OverlayError::validation(
                "default_position fractions must be in [0, 1]",
            ));
        }
        for (id, pos) in self.elements.iter() {
            if id.is_empty() {
                return Err(OverlayError::validation("element id must be non-empty"));
            }
            if let Position::Absolute { x, y } = pos {
                if !x.is_finite() || !y.is_finite() {
                    return Err(OverlayError::validation(format!(
                        "element '{id}' has a non-finite legacy position"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of entries still in the legacy pixel scheme.
    pub fn legacy_count(&self) -> usize {
        self.elements.iter().filter(|(_, p)| p.is_legacy()).count()
    }

    /// Rewrite legacy pixel entries as relative positions using `geometry`.
    ///
    /// `element_sizes` supplies each element's rendered size; a legacy entry
    /// without a known size is left as is. Returns the number migrated.
    #[tracing::instrument(skip_all)]
    pub fn migrate_legacy<G: GeometryProvider + ?Sized>(
        &mut self,
        geometry: &G,
        element_sizes: &BTreeMap<String, Size>,
    ) -> OverlayResult<usize> {
        let container = geometry
            .container_bounds()
            .filter(|c| is_measurable(Some(*c)))
            .ok_or_else(|| OverlayError::geometry("container not measurable; cannot migrate"))?;
        let mut tracker = AnchorTracker::new(self.engine.default_media_left_fraction);
        tracker.measure_now(geometry);
        let anchors = tracker.anchors();

        let mut migrated = 0;
        for (id, pos) in self.elements.iter_mut() {
            if !pos.is_legacy() {
                continue;
            }
            let Some(size) = element_sizes.get(id) else {
                tracing::warn!(id, "no element size; legacy position left unmigrated");
                continue;
            };
            *pos = Position::Relative(pos.into_relative(*size, container, &anchors)?);
            migrated += 1;
        }
        tracing::debug!(migrated, "legacy positions migrated");
        Ok(migrated)
    }
}

#[cfg(test)]
#[path = "../tests/unit/document.rs"]
mod tests;
