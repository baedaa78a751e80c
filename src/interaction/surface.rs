//! Imperative geometry writer for the panel element.
//!
//! While a gesture is active the controller writes geometry straight to the
//! panel's visual handle instead of going through committed state. When the
//! panel is idle the host renders from committed
//! [`LayoutSettings`](crate::model::LayoutSettings) and these writes are not
//! used.

use crate::model::{Point, Size};

/// Handle to the rendered panel element.
pub trait PanelSurface {
    /// Size the panel is currently rendered at.
    fn rendered_size(&self) -> Size;

    /// Move the panel's top-left corner.
    fn write_position(&mut self, position: Point);

    /// Resize the panel, keeping its top-left corner fixed.
    fn write_size(&mut self, size: Size);
}

/// One imperative geometry write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryWrite {
    /// Panel moved to a new top-left corner.
    Position(Point),
    /// Panel resized.
    Size(Size),
}

/// In-memory surface that remembers every write.
#[derive(Debug, Clone, Default)]
pub struct RecordedSurface {
    position: Point,
    size: Size,
    writes: Vec<GeometryWrite>,
}

impl RecordedSurface {
    /// Create a surface rendered at `position` with `size`.
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            writes: Vec::new(),
        }
    }

    /// Current on-screen position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// All writes so far, oldest first.
    pub fn writes(&self) -> &[GeometryWrite] {
        &self.writes
    }

    /// Forget recorded writes, keeping the current geometry.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Reset geometry from committed state, as a declarative render would.
    pub fn sync(&mut self, position: Point, size: Size) {
        self.position = position;
        self.size = size;
    }
}

impl PanelSurface for RecordedSurface {
    fn rendered_size(&self) -> Size {
        self.size
    }

    fn write_position(&mut self, position: Point) {
        self.position = position;
        self.writes.push(GeometryWrite::Position(position));
    }

    fn write_size(&mut self, size: Size) {
        self.size = size;
        self.writes.push(GeometryWrite::Size(size));
    }
}
