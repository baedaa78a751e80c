//! Geometry value types in viewport pixels.
//!
//! All coordinates are `f64` CSS-style pixels with the origin at the
//! top-left of the viewport.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point in viewport pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the left edge of the viewport.
    pub x: f64,
    /// Vertical offset from the top edge of the viewport.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Offset between two pointer positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    /// Horizontal displacement.
    pub dx: f64,
    /// Vertical displacement.
    pub dy: f64,
}

impl Sub for Point {
    type Output = Delta;

    fn sub(self, rhs: Point) -> Delta {
        Delta {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl Add<Delta> for Point {
    type Output = Point;

    fn add(self, rhs: Delta) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

/// Pointer location as reported by pointer events (`clientX`/`clientY`).
pub type PointerPosition = Point;

/// Width and height of the panel in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Add<Delta> for Size {
    type Output = Size;

    fn add(self, rhs: Delta) -> Size {
        Size::new(self.width + rhs.dx, self.height + rhs.dy)
    }
}

/// Current viewport (window inner) dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create new viewport dimensions.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest top-left position that keeps a box of `size` fully inside.
    ///
    /// Floors at zero when the box is larger than the viewport.
    pub fn max_origin(&self, size: Size) -> Point {
        Point::new(
            (self.width - size.width).max(0.0),
            (self.height - size.height).max(0.0),
        )
    }

    /// Clamp a top-left position so a box of `size` stays on-screen.
    pub fn clamp_origin(&self, origin: Point, size: Size) -> Point {
        let max = self.max_origin(size);
        Point::new(origin.x.clamp(0.0, max.x), origin.y.clamp(0.0, max.y))
    }
}
