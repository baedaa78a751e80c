//! Pointer stream to panel geometry, coalesced to one write per frame.
//!
//! # Frame discipline
//!
//! At most one frame callback is outstanding at any time. A pointer move
//! while a frame is already pending replaces the pending candidate instead of
//! requesting another frame, so N moves between two paints cost one write.
//!
//! # Commit point
//!
//! Frame writes go to the [`PanelSurface`] only. Durable layout changes only
//! through the value returned by [`PointerInteractionController::end_interaction`].

use super::frame::{FrameId, FrameScheduler};
use super::session::{Gesture, GeometryUpdate, InteractionMode, InteractionSession};
use super::surface::{GeometryWrite, PanelSurface};
use crate::model::{LayoutBounds, LayoutSettings, PointerPosition, Viewport};
use tracing::{debug, trace};

/// Candidate geometry waiting for its frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingFrame {
    frame: FrameId,
    update: GeometryUpdate,
}

/// What happened when a frame callback fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The pending candidate was written to the surface.
    Applied(GeometryWrite),
    /// The surface was gone (panel unmounted); the candidate was discarded.
    Dropped,
    /// The frame was not the pending one (cancelled or superseded).
    Stale,
}

/// Converts pointer events into drag/resize geometry.
#[derive(Debug)]
pub struct PointerInteractionController<F: FrameScheduler> {
    scheduler: F,
    bounds: LayoutBounds,
    session: Option<InteractionSession>,
    pending: Option<PendingFrame>,
}

impl<F: FrameScheduler> PointerInteractionController<F> {
    /// Create an idle controller.
    pub fn new(scheduler: F, bounds: LayoutBounds) -> Self {
        Self {
            scheduler,
            bounds: bounds.normalized(),
            session: None,
            pending: None,
        }
    }

    /// Start dragging. Returns `false` (and changes nothing) if a session is
    /// already active.
    pub fn begin_drag(&mut self, pointer: PointerPosition, current: LayoutSettings) -> bool {
        self.begin(Gesture::Drag, pointer, current)
    }

    /// Start resizing. Returns `false` (and changes nothing) if a session is
    /// already active.
    pub fn begin_resize(&mut self, pointer: PointerPosition, current: LayoutSettings) -> bool {
        self.begin(Gesture::Resize, pointer, current)
    }

    fn begin(&mut self, gesture: Gesture, pointer: PointerPosition, current: LayoutSettings) -> bool {
        if let Some(active) = &self.session {
            debug!(
                active = ?active.gesture(),
                requested = ?gesture,
                "Session already active, ignoring begin"
            );
            return false;
        }
        debug!(?gesture, ?pointer, base = ?current, "Interaction session started");
        self.session = Some(InteractionSession::new(gesture, pointer, current));
        true
    }

    /// Feed a pointer position. No-op while idle.
    pub fn on_pointer_move(&mut self, pointer: PointerPosition) {
        let Some(session) = &self.session else {
            return;
        };
        let update = session.candidate(pointer, &self.bounds);

        match &mut self.pending {
            Some(pending) => {
                trace!(frame = pending.frame.get(), "Replacing pending candidate");
                pending.update = update;
            }
            None => {
                let frame = self.scheduler.request_frame();
                trace!(frame = frame.get(), "Requested frame");
                self.pending = Some(PendingFrame { frame, update });
            }
        }
    }

    /// Deliver a fired frame callback.
    ///
    /// `viewport` is read by the host at callback time, so a window resized
    /// mid-gesture is still respected. `surface` is `None` when the panel
    /// element no longer exists; the write is then silently discarded.
    pub fn on_animation_frame<S: PanelSurface + ?Sized>(
        &mut self,
        frame: FrameId,
        surface: Option<&mut S>,
        viewport: Viewport,
    ) -> FrameOutcome {
        let pending = match self.pending {
            Some(pending) if pending.frame == frame => pending,
            _ => {
                trace!(frame = frame.get(), "Ignoring stale frame");
                return FrameOutcome::Stale;
            }
        };
        self.pending = None;

        let Some(surface) = surface else {
            trace!(frame = frame.get(), "Panel surface gone, dropping frame");
            return FrameOutcome::Dropped;
        };

        let write = match pending.update {
            GeometryUpdate::Move(position) => {
                let position = viewport.clamp_origin(position, surface.rendered_size());
                surface.write_position(position);
                GeometryWrite::Position(position)
            }
            GeometryUpdate::Resize(size) => {
                surface.write_size(size);
                GeometryWrite::Size(size)
            }
        };
        FrameOutcome::Applied(write)
    }

    /// Finish the active session at `final_pointer`.
    ///
    /// Cancels any pending frame and returns the clamped final layout for the
    /// caller to persist. Returns `None` when no session was active.
    pub fn end_interaction(
        &mut self,
        final_pointer: PointerPosition,
        viewport: Viewport,
    ) -> Option<LayoutSettings> {
        self.cancel_pending();
        let session = self.session.take()?;
        let settings = session.resolve(final_pointer, viewport, &self.bounds);
        debug!(gesture = ?session.gesture(), ?settings, "Interaction session ended");
        Some(settings)
    }

    /// Drop the session and any pending frame without producing a layout.
    pub fn teardown(&mut self) {
        self.cancel_pending();
        if let Some(session) = self.session.take() {
            debug!(gesture = ?session.gesture(), "Interaction session discarded on teardown");
        }
    }

    /// Current gesture mode.
    pub fn mode(&self) -> InteractionMode {
        self.session
            .map(|s| InteractionMode::from(s.gesture()))
            .unwrap_or_default()
    }

    /// Active session, if any.
    pub fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    /// Whether a frame callback is outstanding.
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Size and opacity bounds used for clamping.
    pub fn bounds(&self) -> &LayoutBounds {
        &self.bounds
    }

    /// Frame scheduler, for hosts that need to drain it.
    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// Mutable frame scheduler.
    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!(frame = pending.frame.get(), "Cancelling pending frame");
            self.scheduler.cancel_frame(pending.frame);
        }
    }
}

impl<F: FrameScheduler> Drop for PointerInteractionController<F> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
