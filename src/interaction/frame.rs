//! Next-frame callback scheduling.
//!
//! [`FrameScheduler`] abstracts the platform's "call me before the next
//! paint" primitive (`requestAnimationFrame` in a browser). The host owns the
//! actual callback; when a requested frame fires it hands the [`FrameId`]
//! back to the controller.

/// Handle for a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    /// Wrap a platform frame handle.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw platform handle.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Platform next-frame primitive.
pub trait FrameScheduler {
    /// Request one callback before the next paint.
    fn request_frame(&mut self) -> FrameId;

    /// Cancel a previously requested callback. Unknown ids are ignored.
    fn cancel_frame(&mut self, frame: FrameId);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> FrameId {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        (**self).cancel_frame(frame)
    }
}

/// Scheduler driven by hand: frames fire only when the host drains them.
///
/// Used by the replay host, tests and benches.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    outstanding: Vec<FrameId>,
    requested: usize,
    cancelled: usize,
}

impl ManualFrameScheduler {
    /// Create a scheduler with no outstanding frames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every outstanding frame, oldest first.
    ///
    /// The host then delivers each id to the controller, simulating one
    /// display refresh.
    pub fn take_due(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.outstanding)
    }

    /// Frames requested but neither fired nor cancelled.
    pub fn outstanding(&self) -> &[FrameId] {
        &self.outstanding
    }

    /// Total `request_frame` calls.
    pub fn requested_count(&self) -> usize {
        self.requested
    }

    /// Total `cancel_frame` calls that removed an outstanding frame.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId::new(self.next_id);
        self.outstanding.push(id);
        self.requested += 1;
        id
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        let before = self.outstanding.len();
        self.outstanding.retain(|id| *id != frame);
        if self.outstanding.len() < before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_hands_out_unique_ids() {
        let mut scheduler = ManualFrameScheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        assert_ne!(a, b);
        assert_eq!(scheduler.outstanding(), &[a, b]);
        assert_eq!(scheduler.requested_count(), 2);
    }

    #[test]
    fn cancel_removes_outstanding_frame() {
        let mut scheduler = ManualFrameScheduler::new();
        let a = scheduler.request_frame();
        scheduler.cancel_frame(a);
        assert!(scheduler.outstanding().is_empty());
        assert_eq!(scheduler.cancelled_count(), 1);
    }

    #[test]
    fn cancel_unknown_frame_is_ignored() {
        let mut scheduler = ManualFrameScheduler::new();
        scheduler.cancel_frame(FrameId::new(99));
        assert_eq!(scheduler.cancelled_count(), 0);
    }

    #[test]
    fn take_due_drains_outstanding() {
        let mut scheduler = ManualFrameScheduler::new();
        let a = scheduler.request_frame();
        assert_eq!(scheduler.take_due(), vec![a]);
        assert!(scheduler.outstanding().is_empty());
    }
}
