//! Pointer-driven drag and resize.
//!
//! Pure state machine plus two host seams: [`FrameScheduler`] for next-frame
//! callbacks and [`PanelSurface`] for imperative geometry writes.

pub mod controller;
pub mod frame;
pub mod session;
pub mod surface;

// Re-export for convenience
pub use controller::{FrameOutcome, PointerInteractionController};
pub use frame::{FrameId, FrameScheduler, ManualFrameScheduler};
pub use session::{Gesture, GeometryUpdate, InteractionMode, InteractionSession};
pub use surface::{GeometryWrite, PanelSurface, RecordedSurface};
