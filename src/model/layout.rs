//! Panel layout settings and their clamping rules.
//!
//! [`LayoutSettings`] is the only durable state of the panel. Every value
//! that leaves [`LayoutSettings::clamped`] satisfies:
//!
//! - `min_width <= width <= max_width`
//! - `min_height <= height <= max_height`
//! - `0 <= x <= max(0, viewport.width - width)`
//! - `0 <= y <= max(0, viewport.height - height)`
//! - `min_opacity <= opacity <= max_opacity`
//!
//! Out-of-range values are repaired, never rejected.

use super::geometry::{Point, Size, Viewport};
use serde::{Deserialize, Serialize};

/// Size and opacity limits for the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBounds {
    /// Narrowest allowed panel width.
    pub min_width: f64,
    /// Widest allowed panel width.
    pub max_width: f64,
    /// Shortest allowed panel height.
    pub min_height: f64,
    /// Tallest allowed panel height.
    pub max_height: f64,
    /// Lowest allowed opacity.
    pub min_opacity: f64,
    /// Highest allowed opacity.
    pub max_opacity: f64,
}

impl Default for LayoutBounds {
    fn default() -> Self {
        Self {
            min_width: 280.0,
            max_width: 600.0,
            min_height: 300.0,
            max_height: 600.0,
            min_opacity: 0.3,
            max_opacity: 1.0,
        }
    }
}

impl LayoutBounds {
    /// Clamp a size into the width/height bounds.
    pub fn clamp_size(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min_width, self.max_width),
            size.height.clamp(self.min_height, self.max_height),
        )
    }

    /// Clamp an opacity into the opacity bounds.
    pub fn clamp_opacity(&self, opacity: f64) -> f64 {
        opacity.clamp(self.min_opacity, self.max_opacity)
    }

    /// Repair bounds whose minimum exceeds its maximum or that are not finite.
    ///
    /// `f64::clamp` panics when `min > max` or either bound is NaN, so
    /// config-supplied bounds pass through here before use.
    pub fn normalized(self) -> Self {
        fn ordered(a: f64, b: f64, fallback: (f64, f64)) -> (f64, f64) {
            let a = if a.is_finite() { a } else { fallback.0 };
            let b = if b.is_finite() { b } else { fallback.1 };
            if a <= b {
                (a, b)
            } else {
                (b, a)
            }
        }
        let d = Self::default();
        let (min_width, max_width) = ordered(self.min_width, self.max_width, (d.min_width, d.max_width));
        let (min_height, max_height) =
            ordered(self.min_height, self.max_height, (d.min_height, d.max_height));
        let (min_opacity, max_opacity) =
            ordered(self.min_opacity, self.max_opacity, (d.min_opacity, d.max_opacity));
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
            min_opacity,
            max_opacity,
        }
    }
}

/// Values used when no persisted layout exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelDefaults {
    /// Initial panel size.
    pub size: Size,
    /// Initial opacity.
    pub opacity: f64,
    /// Gap between the panel and the bottom/right viewport edges.
    pub edge_margin: f64,
}

impl Default for PanelDefaults {
    fn default() -> Self {
        Self {
            size: Size::new(320.0, 384.0),
            opacity: 1.0,
            edge_margin: 24.0,
        }
    }
}

impl PanelDefaults {
    /// Replace non-finite fields with the built-in defaults.
    ///
    /// Config files may spell `nan` or `inf`, and a NaN passes straight
    /// through `f64::clamp`.
    pub fn normalized(self) -> Self {
        fn finite_or(value: f64, fallback: f64) -> f64 {
            if value.is_finite() {
                value
            } else {
                fallback
            }
        }
        let d = Self::default();
        Self {
            size: Size::new(
                finite_or(self.size.width, d.size.width),
                finite_or(self.size.height, d.size.height),
            ),
            opacity: finite_or(self.opacity, d.opacity),
            edge_margin: finite_or(self.edge_margin, d.edge_margin),
        }
    }
}

/// Durable panel layout: top-left position, size and opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Top-left corner in viewport pixels.
    pub position: Point,
    /// Panel size in pixels.
    pub size: Size,
    /// Panel opacity.
    pub opacity: f64,
}

impl LayoutSettings {
    /// Create settings without clamping.
    pub const fn new(position: Point, size: Size, opacity: f64) -> Self {
        Self {
            position,
            size,
            opacity,
        }
    }

    /// Default layout: bottom-right corner, inset by the edge margin.
    pub fn defaults_for(viewport: Viewport, defaults: &PanelDefaults, bounds: &LayoutBounds) -> Self {
        let size = bounds.clamp_size(defaults.size);
        let position = Point::new(
            viewport.width - size.width - defaults.edge_margin,
            viewport.height - size.height - defaults.edge_margin,
        );
        Self::new(position, size, defaults.opacity).clamped(viewport, bounds)
    }

    /// Repair every field into range for `viewport`.
    ///
    /// Size is clamped first so the position bounds use the repaired size.
    pub fn clamped(self, viewport: Viewport, bounds: &LayoutBounds) -> Self {
        let size = bounds.clamp_size(self.size);
        Self {
            position: viewport.clamp_origin(self.position, size),
            size,
            opacity: bounds.clamp_opacity(self.opacity),
        }
    }

    /// Whether every invariant already holds for `viewport`.
    pub fn is_within(&self, viewport: Viewport, bounds: &LayoutBounds) -> bool {
        self.clamped(viewport, bounds) == *self
    }
}

/// Persisted record shape: `{position:{x,y}, width, height, opacity}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredLayout {
    /// Top-left corner.
    pub position: Point,
    /// Panel width.
    pub width: f64,
    /// Panel height.
    pub height: f64,
    /// Panel opacity.
    pub opacity: f64,
}

impl From<LayoutSettings> for StoredLayout {
    fn from(settings: LayoutSettings) -> Self {
        Self {
            position: settings.position,
            width: settings.size.width,
            height: settings.size.height,
            opacity: settings.opacity,
        }
    }
}

impl From<StoredLayout> for LayoutSettings {
    fn from(stored: StoredLayout) -> Self {
        LayoutSettings::new(
            stored.position,
            Size::new(stored.width, stored.height),
            stored.opacity,
        )
    }
}
