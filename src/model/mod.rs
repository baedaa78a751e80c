//! Domain model types (pure).
//!
//! All types in this module are plain data with clamping helpers.

pub mod error;
pub mod geometry;
pub mod layout;

// Re-export for convenience
pub use error::{AppError, StoreError, TraceError};
pub use geometry::{Delta, Point, PointerPosition, Size, Viewport};
pub use layout::{LayoutBounds, LayoutSettings, PanelDefaults, StoredLayout};
