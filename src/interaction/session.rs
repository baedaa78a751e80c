//! Transient gesture state.

use crate::model::{LayoutBounds, LayoutSettings, Point, PointerPosition, Size, Viewport};

/// Which gesture the controller is tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Header pressed: pointer motion translates the panel.
    Dragging,
    /// Corner handle pressed: pointer motion resizes the panel.
    Resizing,
}

/// Kind of an active session. A session never changes kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Translate the panel.
    Drag,
    /// Resize the panel from its bottom-right corner.
    Resize,
}

impl From<Gesture> for InteractionMode {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::Drag => InteractionMode::Dragging,
            Gesture::Resize => InteractionMode::Resizing,
        }
    }
}

/// Geometry computed from one pointer position, waiting for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryUpdate {
    /// Unclamped top-left corner. Clamped against the viewport and the
    /// rendered size when the frame is applied.
    Move(Point),
    /// Size already clamped to the size bounds.
    Resize(Size),
}

/// One in-progress drag or resize.
///
/// `origin` and `base` are captured at press time and never change; every
/// geometry is computed from them and the latest pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSession {
    gesture: Gesture,
    origin: PointerPosition,
    base: LayoutSettings,
}

impl InteractionSession {
    /// Start a session at `origin` over a panel laid out as `base`.
    pub fn new(gesture: Gesture, origin: PointerPosition, base: LayoutSettings) -> Self {
        Self {
            gesture,
            origin,
            base,
        }
    }

    /// Drag or resize.
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Pointer position at press time.
    pub fn origin(&self) -> PointerPosition {
        self.origin
    }

    /// Layout snapshot at press time.
    pub fn base(&self) -> LayoutSettings {
        self.base
    }

    /// Candidate geometry for a pointer position.
    pub fn candidate(&self, pointer: PointerPosition, bounds: &LayoutBounds) -> GeometryUpdate {
        let delta = pointer - self.origin;
        match self.gesture {
            Gesture::Drag => GeometryUpdate::Move(self.base.position + delta),
            Gesture::Resize => GeometryUpdate::Resize(bounds.clamp_size(self.base.size + delta)),
        }
    }

    /// Final layout for the release position, clamped to `viewport`.
    ///
    /// A drag only changes position and a resize only changes size; the final
    /// clamp may still pull a resized panel back on-screen.
    pub fn resolve(
        &self,
        pointer: PointerPosition,
        viewport: Viewport,
        bounds: &LayoutBounds,
    ) -> LayoutSettings {
        let settings = match self.candidate(pointer, bounds) {
            GeometryUpdate::Move(position) => LayoutSettings { position, ..self.base },
            GeometryUpdate::Resize(size) => LayoutSettings { size, ..self.base },
        };
        settings.clamped(viewport, bounds)
    }
}
