//! On-demand viewport readings.

use crate::model::Viewport;
use std::cell::Cell;
use std::rc::Rc;

/// Supplies the current viewport size whenever asked.
///
/// The engine never subscribes to window resize events; it re-reads the
/// viewport at load time, at every frame and at release.
pub trait ViewportSource {
    /// Current viewport dimensions.
    fn viewport(&self) -> Viewport;
}

impl ViewportSource for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}

/// Viewport cell shared between the host (writer) and the panel (reader).
#[derive(Debug, Clone, Default)]
pub struct SharedViewport(Rc<Cell<Viewport>>);

impl SharedViewport {
    /// Create a shared reading starting at `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self(Rc::new(Cell::new(viewport)))
    }

    /// Record a new window size.
    pub fn set(&self, viewport: Viewport) {
        self.0.set(viewport);
    }
}

impl ViewportSource for SharedViewport {
    fn viewport(&self) -> Viewport {
        self.0.get()
    }
}
