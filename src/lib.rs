//! Resolution-independent positioning for overlay elements on a two-column banner.
//!
//! Overlay elements (buttons, social links, text blocks) sit on top of a
//! banner made of a text column and a media column. Their positions are
//! stored as a fraction of container width plus a vertical offset from the
//! bottom of whichever column they belong to, so a layout edited at one
//! viewport width still looks right at another.
//!
//! # Pieces
//!
//! 1. **Measure**: [`AnchorTracker`] turns [`GeometryProvider`] rectangles into [`Anchors`].
//! 2. **Resolve**: [`resolve_zone`] picks the text or media anchor for an element.
//! 3. **Convert**: [`to_pixels`] / [`from_pixels`] map between [`RelativePosition`] and pixels.
//! 4. **Drag**: [`DragSession`] separates clicks from drags and clamps movement.
//! 5. **Host**: [`OverlayEditor`] wires the above to pointer and layout callbacks.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO**: geometry is injected, changes leave through a callback.
//! - **Deterministic**: conversions and zone resolution are pure.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod anchor;
mod config;
mod document;
mod drag;
mod editor;
mod foundation;
mod geometry;
mod position;

pub use anchor::tracker::{AnchorTracker, Anchors};
pub use config::{EngineConfig, VerticalClamp};
pub use document::OverlayDocument;
pub use drag::session::{DragEnd, DragPhase, DragSession};
pub use editor::{ChangeCallback, EditorEvent, OverlayEditor};
pub use foundation::core::{Point, Rect, Size, Vec2, Zone, clamp_unit};
pub use foundation::error::{OverlayError, OverlayResult};
pub use geometry::provider::{GeometryProvider, StaticGeometry};
pub use position::model::{Position, RelativePosition};
pub use position::store::{PositionStore, from_pixels, to_pixels};
pub use position::zone::resolve_zone;
