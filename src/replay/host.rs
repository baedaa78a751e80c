//! In-memory host that drives a [`FloatingPanelController`] from trace events.
//!
//! Plays the roles a browser page would: owns the panel element
//! ([`RecordedSurface`]), the window size ([`SharedViewport`]), the global
//! listener table ([`ListenerRegistry`]) and the frame clock
//! ([`ManualFrameScheduler`]).

use super::TraceEvent;
use crate::interaction::{FrameOutcome, ManualFrameScheduler, RecordedSurface};
use crate::model::{LayoutSettings, Point, Size, StoredLayout, Viewport};
use crate::panel::{
    FloatingPanelController, ListenerRegistry, PanelOptions, Presentation, SharedViewport,
};
use crate::store::{KeyValueStorage, LayoutSettingsStore};
use serde::Serialize;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

/// Counters collected while replaying a trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Events applied.
    pub events: usize,
    /// Frame callbacks requested by the controller.
    pub frames_requested: usize,
    /// Frames that wrote geometry to the panel element.
    pub frames_applied: usize,
    /// Frames discarded because the element was gone.
    pub frames_dropped: usize,
    /// Frames that fired after being cancelled or superseded.
    pub frames_stale: usize,
    /// Drag/resize sessions committed on release.
    pub gesture_commits: usize,
    /// Opacity changes saved.
    pub opacity_commits: usize,
    /// Global listener registrations still attached at the end.
    pub listeners_attached: usize,
    /// Last committed layout, if the panel was ever opened.
    pub layout: Option<StoredLayout>,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "events:      {}", self.events)?;
        writeln!(
            f,
            "frames:      requested {}, applied {}, dropped {}, stale {}",
            self.frames_requested, self.frames_applied, self.frames_dropped, self.frames_stale
        )?;
        writeln!(
            f,
            "commits:     {} gesture, {} opacity",
            self.gesture_commits, self.opacity_commits
        )?;
        writeln!(f, "listeners:   {}", self.listeners_attached)?;
        match &self.layout {
            Some(layout) => write!(
                f,
                "layout:      x={} y={} width={} height={} opacity={}",
                layout.position.x, layout.position.y, layout.width, layout.height, layout.opacity
            ),
            None => write!(f, "layout:      (never opened)"),
        }
    }
}

/// Browser-page stand-in for replaying traces.
pub struct ReplayHost<S: KeyValueStorage> {
    panel: FloatingPanelController<S, ManualFrameScheduler, SharedViewport>,
    viewport: SharedViewport,
    registry: Rc<ListenerRegistry>,
    surface: Option<RecordedSurface>,
    report: ReplayReport,
}

impl<S: KeyValueStorage> ReplayHost<S> {
    /// Create a host with a closed panel.
    pub fn new(store: LayoutSettingsStore<S>, viewport: Viewport, options: PanelOptions) -> Self {
        let viewport = SharedViewport::new(viewport);
        let registry = Rc::new(ListenerRegistry::new());
        let panel = FloatingPanelController::new(
            store,
            ManualFrameScheduler::new(),
            viewport.clone(),
            registry.clone(),
            options,
        );
        Self {
            panel,
            viewport,
            registry,
            surface: None,
            report: ReplayReport::default(),
        }
    }

    /// Apply one event.
    pub fn apply(&mut self, event: TraceEvent) {
        debug!(?event, "Replaying event");
        self.report.events += 1;

        match event {
            TraceEvent::Open => {
                self.panel.open();
                self.mount();
            }
            TraceEvent::Close => {
                self.panel.close();
                self.surface = None;
            }
            TraceEvent::Toggle => {
                self.panel.toggle();
                if self.panel.presentation().is_some() {
                    self.mount();
                } else {
                    self.surface = None;
                }
            }
            TraceEvent::PointerDown(target, pointer) => {
                self.panel.pointer_down(target, pointer);
            }
            TraceEvent::PointerMove(pointer) => self.panel.pointer_move(pointer),
            TraceEvent::PointerUp(pointer) => {
                if let Some(committed) = self.panel.pointer_up(pointer) {
                    self.report.gesture_commits += 1;
                    self.render_committed(committed);
                }
            }
            TraceEvent::Frame => self.fire_frames(),
            TraceEvent::Unmount => self.surface = None,
            TraceEvent::Viewport(viewport) => {
                self.viewport.set(viewport);
                if !self.panel.is_interacting() {
                    self.mount();
                }
            }
            TraceEvent::Opacity(value) => {
                self.panel.set_opacity(value);
                self.report.opacity_commits += 1;
            }
        }
    }

    /// Apply every event in order.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = TraceEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Snapshot the counters so far.
    pub fn report(&self) -> ReplayReport {
        let mut report = self.report.clone();
        report.frames_requested = self.panel.interaction().scheduler().requested_count();
        report.listeners_attached = self.registry.active_count();
        report.layout = self.panel.settings().map(StoredLayout::from);
        report
    }

    /// Drop the panel (closing it if needed) and return the final report.
    pub fn finish(mut self) -> ReplayReport {
        self.panel.close();
        self.surface = None;
        let report = self.report();
        info!(?report, "Replay finished");
        report
    }

    /// Panel element, if mounted.
    pub fn surface(&self) -> Option<&RecordedSurface> {
        self.surface.as_ref()
    }

    /// Panel under replay.
    pub fn panel(&self) -> &FloatingPanelController<S, ManualFrameScheduler, SharedViewport> {
        &self.panel
    }

    fn fire_frames(&mut self) {
        let due = self.panel.interaction_mut().scheduler_mut().take_due();
        for frame in due {
            match self.panel.animation_frame(frame, self.surface.as_mut()) {
                FrameOutcome::Applied(_) => self.report.frames_applied += 1,
                FrameOutcome::Dropped => self.report.frames_dropped += 1,
                FrameOutcome::Stale => self.report.frames_stale += 1,
            }
        }
    }

    /// Declarative render: (re)create the element from presentation state.
    fn mount(&mut self) {
        let Some(presentation) = self.panel.presentation() else {
            self.surface = None;
            return;
        };
        let (position, size) = match presentation {
            Presentation::Floating(settings) => (settings.position, settings.size),
            Presentation::Fullscreen(viewport) => {
                (Point::new(0.0, 0.0), Size::new(viewport.width, viewport.height))
            }
        };
        match &mut self.surface {
            Some(surface) => surface.sync(position, size),
            None => self.surface = Some(RecordedSurface::new(position, size)),
        }
    }

    fn render_committed(&mut self, committed: LayoutSettings) {
        if let Some(surface) = &mut self.surface {
            surface.sync(committed.position, committed.size);
        }
    }
}
