use std::time::Instant;

use crate::{
    config::EngineConfig,
    foundation::core::{Point, Rect, Size, Vec2, is_measurable, offset_in},
};

/// Where a pointer interaction currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    /// No interaction in progress.
    Idle,
    /// Pressed, movement still under the threshold; may resolve to a click.
    Pending,
    /// Confirmed drag; the element follows the pointer.
    Active,
}

/// How an interaction ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEnd {
    /// Released without crossing the threshold.
    Click,
    /// Released after dragging; offsets are relative to the container's top-left.
    Moved {
        /// Final left edge in pixels.
        left: f64,
        /// Final top edge in pixels.
        top: f64,
        /// Element size captured at pointer-down.
        element_size: Size,
    },
    /// Release with no interaction in progress.
    Ignored,
}

#[derive(Clone, Copy, Debug)]
struct Grab {
    start_pointer: Point,
    start_offset: Point,
    element_size: Size,
    live_offset: Point,
}

/// Pointer-down to pointer-up state machine for one overlay element.
///
/// `Idle -> Pending -> Active -> Idle`. A press whose pointer never gets
/// further than the threshold (straight-line distance) from where it went
/// down is a click; anything else is a drag whose
/// horizontal position is kept inside the container and whose vertical
/// movement is limited to [`EngineConfig::vertical_clamp`].
#[derive(Clone, Debug)]
pub struct DragSession {
    config: EngineConfig,
    phase: DragPhase,
    grab: Option<Grab>,
    recent_drag: bool,
    suppress_until: Option<Instant>,
}

impl DragSession {
    /// Idle session using `config` thresholds.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            phase: DragPhase::Idle,
            grab: None,
            recent_drag: false,
            suppress_until: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Live element offset while dragging.
    pub fn live_offset(&self) -> Option<Point> {
        match self.phase {
            DragPhase::Active => self.grab.map(|g| g.live_offset),
            DragPhase::Idle | DragPhase::Pending => None,
        }
    }

    /// Pointer pressed on the element. `element_rect` and `container` share a coordinate space.
    pub fn pointer_down(&mut self, pointer: Point, element_rect: Rect, container: Rect) {
        let start_offset = offset_in(element_rect, container);
        self.grab = Some(Grab {
            start_pointer: pointer,
            start_offset,
            element_size: element_rect.size(),
            live_offset: start_offset,
        });
        self.phase = DragPhase::Pending;
        tracing::debug!(?pointer, ?start_offset, "drag pending");
    }

    /// Pointer moved. Returns the element's live offset once the drag is active.
    ///
    /// With no measurable container this frame the session does not update.
    pub fn pointer_move(&mut self, pointer: Point, container: Option<Rect>) -> Option<Point> {
        let grab = self.grab.as_mut()?;
        if self.phase == DragPhase::Idle {
            return None;
        }
        let Some(container) = container.filter(|c| is_measurable(Some(*c))) else {
            tracing::trace!("container unmeasurable; move skipped");
            return None;
        };

        let delta: Vec2 = pointer - grab.start_pointer;
        if self.phase == DragPhase::Pending {
            let threshold = self.config.drag_threshold_px;
            if delta.hypot() <= threshold {
                return None;
            }
            self.phase = DragPhase::Active;
            self.recent_drag = true;
            self.suppress_until = None;
            tracing::debug!(?delta, "drag active");
        }

        let max_left = (container.width() - grab.element_size.width).max(0.0);
        let left = (grab.start_offset.x + delta.x).min(max_left).max(0.0);
        let top = grab.start_offset.y + self.config.vertical_clamp.apply(delta.y);
        grab.live_offset = Point::new(left, top);
        Some(grab.live_offset)
    }

    /// Pointer released at `now`.
    pub fn pointer_up(&mut self, now: Instant) -> DragEnd {
        let phase = self.phase;
        let grab = self.grab.take();
        self.phase = DragPhase::Idle;
        match (phase, grab) {
            (DragPhase::Pending, Some(_)) => {
                tracing::debug!("released below threshold; click");
                DragEnd::Click
            }
            (DragPhase::Active, Some(g)) => {
                self.suppress_until = Some(now + self.config.click_suppress());
                tracing::debug!(offset = ?g.live_offset, "drag ended");
                DragEnd::Moved {
                    left: g.live_offset.x,
                    top: g.live_offset.y,
                    element_size: g.element_size,
                }
            }
            _ => DragEnd::Ignored,
        }
    }

    /// Abandon the interaction without producing a click or a move.
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
        self.grab = None;
    }

    /// Whether a click arriving at `now` trails a drag and should be ignored.
    pub fn suppresses_click(&mut self, now: Instant) -> bool {
        if !self.recent_drag {
            return false;
        }
        match self.suppress_until {
            Some(until) if now >= until => {
                self.recent_drag = false;
                self.suppress_until = None;
                false
            }
            _ => true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drag/session.rs"]
mod tests;
