use std::time::Instant;

use crate::{
    anchor::tracker::{AnchorTracker, Anchors},
    config::EngineConfig,
    drag::session::{DragEnd, DragPhase, DragSession},
    foundation::core::{Point, Rect, is_measurable, offset_in},
    geometry::provider::GeometryProvider,
    position::model::{Position, RelativePosition},
    position::store::{PositionStore, from_pixels, to_pixels},
};

/// Persistence hook invoked with `(element_id, new_position)`.
pub type ChangeCallback = Box<dyn FnMut(&str, &Position)>;

/// Outcome of a pointer release, for the host to act on.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Press and release without dragging; open the element's editing affordance.
    Click {
        /// Element that was clicked.
        id: String,
    },
    /// A drag finished and the new position was stored.
    Committed {
        /// Element that moved.
        id: String,
        /// Stored position.
        position: RelativePosition,
    },
    /// Nothing happened.
    None,
}

/// Positioning engine for the overlay elements of one banner.
///
/// The host forwards layout notifications, frame ticks and pointer events;
/// the editor keeps anchors current, runs at most one drag at a time and
/// reports finished drags through the change callback.
pub struct OverlayEditor<G: GeometryProvider> {
    geometry: G,
    config: EngineConfig,
    tracker: AnchorTracker,
    positions: PositionStore,
    default_position: RelativePosition,
    session: DragSession,
    active: Option<(String, Rect)>,
    editable: bool,
    on_change: Option<ChangeCallback>,
}

impl<G: GeometryProvider> OverlayEditor<G> {
    /// New editable engine; measures the current layout once.
    pub fn new(geometry: G, config: EngineConfig) -> Self {
        let mut tracker = AnchorTracker::new(config.default_media_left_fraction);
        tracker.measure_now(&geometry);
        Self {
            geometry,
            config,
            tracker,
            positions: PositionStore::new(),
            default_position: RelativePosition::default(),
            session: DragSession::new(config),
            active: None,
            editable: true,
            on_change: None,
        }
    }

    /// Position used for elements with nothing stored.
    pub fn with_default_position(mut self, default_position: RelativePosition) -> Self {
        self.default_position = default_position;
        self
    }

    /// Start from previously stored positions.
    pub fn with_positions(mut self, positions: PositionStore) -> Self {
        self.positions = positions;
        self
    }

    /// Register the persistence hook.
    pub fn on_change(mut self, callback: impl FnMut(&str, &Position) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Stored positions.
    pub fn positions(&self) -> &PositionStore {
        &self.positions
    }

    /// Consume the editor, returning stored positions.
    pub fn into_positions(self) -> PositionStore {
        self.positions
    }

    /// Replace stored positions (e.g. after the host reloads its document).
    pub fn load_positions(&mut self, positions: PositionStore) {
        self.positions = positions;
    }

    /// Current anchors.
    pub fn anchors(&self) -> Anchors {
        self.tracker.anchors()
    }

    /// Geometry provider, for hosts that push measurements.
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    /// Whether pointer input may move elements.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Toggle edit mode. Leaving edit mode cancels any drag in progress.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        if !editable {
            self.session.cancel();
            self.active = None;
        }
    }

    /// Phase of the current pointer interaction.
    pub fn drag_phase(&self) -> DragPhase {
        self.session.phase()
    }

    /// Container, text column or media column changed size.
    pub fn layout_changed(&mut self) {
        self.tracker.layout_changed();
    }

    /// Frame tick. Returns `true` if anchors moved and placements should be refreshed.
    pub fn animation_frame(&mut self) -> bool {
        self.tracker.animation_frame(&self.geometry)
    }

    fn container(&self) -> Option<Rect> {
        self.geometry
            .container_bounds()
            .filter(|c| is_measurable(Some(*c)))
            .or_else(|| self.tracker.container())
    }

    /// Where to render `id`, relative to the container's top-left.
    ///
    /// While `id` is being dragged this is the live drag offset. `None` when
    /// the container cannot be measured.
    pub fn placement(&self, id: &str) -> Option<Point> {
        if let Some((active_id, _)) = &self.active
            && active_id == id
            && let Some(live) = self.session.live_offset()
        {
            return Some(live);
        }
        let container = self.container()?;
        let position = self.positions.get_or(id, self.default_position);
        to_pixels(&position, &self.tracker.anchors(), container).ok()
    }

    /// Pointer pressed on element `id` whose rendered bounds are `element_rect`.
    ///
    /// Returns `false` (and does nothing) outside edit mode or when the
    /// container cannot be measured.
    pub fn pointer_down(&mut self, id: &str, pointer: Point, element_rect: Rect) -> bool {
        if !self.editable {
            return false;
        }
        let Some(container) = self.geometry.container_bounds().filter(|c| is_measurable(Some(*c)))
        else {
            tracing::warn!(id, "pointer down ignored: container not measurable");
            return false;
        };
        self.session.pointer_down(pointer, element_rect, container);
        self.active = Some((id.to_string(), element_rect));
        true
    }

    /// Pointer moved. Returns the live offset of the dragged element once the drag is active.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Point> {
        self.active.as_ref()?;
        let container = self.geometry.container_bounds();
        self.session.pointer_move(pointer, container)
    }

    /// Pointer released at `pointer` and time `now`.
    pub fn pointer_up(&mut self, pointer: Point, now: Instant) -> EditorEvent {
        let Some((id, element_rect)) = self.active.take() else {
            return EditorEvent::None;
        };
        self.session.pointer_move(pointer, self.geometry.container_bounds());

        match self.session.pointer_up(now) {
            DragEnd::Click => {
                self.seed_from_rendered(&id, element_rect);
                EditorEvent::Click { id }
            }
            DragEnd::Moved {
                left,
                top,
                element_size,
            } => {
                self.tracker.measure_now(&self.geometry);
                let Some(container) = self.container() else {
                    tracing::warn!(id, "drag end ignored: container not measurable");
                    return EditorEvent::None;
                };
                match from_pixels(left, top, element_size, container, &self.tracker.anchors()) {
                    Ok(position) => {
                        self.commit(&id, Position::Relative(position));
                        EditorEvent::Committed { id, position }
                    }
                    Err(err) => {
                        tracing::warn!(id, %err, "drag end not stored");
                        EditorEvent::None
                    }
                }
            }
            DragEnd::Ignored => EditorEvent::None,
        }
    }

    /// Whether a click arriving at `now` trails a just-finished drag.
    pub fn suppresses_click(&mut self, now: Instant) -> bool {
        self.session.suppresses_click(now)
    }

    /// Explicit reset: forget the stored position so `id` renders at the default.
    ///
    /// Returns the removed position, if any. The change callback only fires
    /// when something was actually removed.
    pub fn reset_position(&mut self, id: &str) -> Option<Position> {
        let removed = self.positions.reset(id);
        if removed.is_none() {
            return None;
        }
        let default = Position::Relative(self.default_position);
        if let Some(cb) = self.on_change.as_mut() {
            cb(id, &default);
        }
        tracing::debug!(id, "position reset");
        removed
    }

    fn seed_from_rendered(&mut self, id: &str, element_rect: Rect) {
        if self.positions.get(id).is_some() {
            return;
        }
        let Some(container) = self.container() else {
            return;
        };
        let offset = offset_in(element_rect, container);
        if let Ok(seed) = from_pixels(
            offset.x,
            offset.y,
            element_rect.size(),
            container,
            &self.tracker.anchors(),
        ) {
            self.positions.seed_if_absent(id, Position::Relative(seed));
            tracing::debug!(id, ?seed, "seeded position from rendered bounds");
        }
    }

    fn commit(&mut self, id: &str, position: Position) {
        self.positions.set(id, position);
        if let Some(cb) = self.on_change.as_mut() {
            cb(id, &position);
        }
        tracing::debug!(id, ?position, "position committed");
    }
}

#[cfg(test)]
#[path = "../tests/unit/editor.rs"]
mod tests;
