//! Snap/alignment engine
//!
//! Given a candidate position (drag) or candidate edges (resize) and the
//! sibling rectangles, locks anchors that fall within tolerance of a sibling
//! anchor and reports where the guide lines go. Independent of the constraint
//! graph.

pub mod config;
pub mod grid;
pub mod guide;
pub mod moving;
pub mod resize;

pub use config::{SnapConfig, SnapConfigError};
pub use grid::{round_resize_delta, round_to_grid};
pub use guide::{Guide, GuideAxis, Guides};
pub use moving::{snap_move, MoveSnap};
pub use resize::{snap_resize, DeltaRect, ResizeEdges, ResizeSnap};
