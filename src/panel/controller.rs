//! Top-level panel state machine.
//!
//! ```text
//!            open()                 pointer_down(Header)
//!  Closed ───────────▶ Open/Idle ─────────────────────▶ Open/Dragging
//!    ▲                  │  ▲  ╲  pointer_down(ResizeHandle)     │
//!    │      close()     │  │   ╲──────────────▶ Open/Resizing │
//!    └──────────────────┘  │                        │         │
//!                          └──── pointer_up ────────┴─────────┘
//!                                (end, save, Idle)
//! ```
//!
//! Rendering follows two paths: while idle the host renders from
//! [`FloatingPanelController::presentation`]; while
//! [`FloatingPanelController::is_interacting`] the frame writer owns the
//! element geometry and the host must not overwrite it.

use super::listeners::{GlobalPointerEvents, ListenerGuard};
use super::viewport::ViewportSource;
use crate::interaction::{
    FrameId, FrameOutcome, FrameScheduler, InteractionMode, PanelSurface,
    PointerInteractionController,
};
use crate::model::{LayoutSettings, PointerPosition, Viewport};
use crate::store::{KeyValueStorage, LayoutSettingsStore};
use std::rc::Rc;
use tracing::{debug, info};

/// Default width below which the panel goes fullscreen.
pub const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;

/// Whether the panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Only the launcher is visible.
    Closed,
    /// The panel is visible and listening for global pointer events.
    Open,
}

/// Element that received a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Title bar: starts a drag.
    Header,
    /// Bottom-right corner grip: starts a resize.
    ResizeHandle,
    /// Panel content. Not an interaction affordance.
    Body,
}

/// How the host should lay out the open panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presentation {
    /// Floating at the committed layout.
    Floating(LayoutSettings),
    /// Filling the viewport (narrow screens). Drag and resize are disabled.
    Fullscreen(Viewport),
}

/// Panel behaviour knobs not owned by the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelOptions {
    /// Viewport widths strictly below this are treated as mobile.
    pub mobile_breakpoint: f64,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
        }
    }
}

impl PanelOptions {
    /// Replace a non-finite breakpoint with the default.
    pub fn normalized(self) -> Self {
        if self.mobile_breakpoint.is_finite() {
            self
        } else {
            Self::default()
        }
    }
}

/// Glues pointer input to the interaction controller and the layout store.
pub struct FloatingPanelController<S, F, V>
where
    S: KeyValueStorage,
    F: FrameScheduler,
    V: ViewportSource,
{
    store: LayoutSettingsStore<S>,
    interaction: PointerInteractionController<F>,
    viewport: V,
    events: Rc<dyn GlobalPointerEvents>,
    options: PanelOptions,
    settings: Option<LayoutSettings>,
    listeners: Option<ListenerGuard>,
}

impl<S, F, V> FloatingPanelController<S, F, V>
where
    S: KeyValueStorage,
    F: FrameScheduler,
    V: ViewportSource,
{
    /// Create a closed panel.
    pub fn new(
        store: LayoutSettingsStore<S>,
        scheduler: F,
        viewport: V,
        events: Rc<dyn GlobalPointerEvents>,
        options: PanelOptions,
    ) -> Self {
        let interaction = PointerInteractionController::new(scheduler, *store.bounds());
        Self {
            store,
            interaction,
            viewport,
            events,
            options: options.normalized(),
            settings: None,
            listeners: None,
        }
    }

    /// Show the panel: load layout and attach global listeners.
    pub fn open(&mut self) {
        if self.listeners.is_some() {
            return;
        }
        let viewport = self.viewport.viewport();
        let settings = self.store.load(viewport);
        self.settings = Some(settings);
        self.listeners = Some(ListenerGuard::acquire(self.events.clone()));
        info!(?settings, ?viewport, "Panel opened");
    }

    /// Hide the panel. An unfinished gesture is discarded, not saved.
    pub fn close(&mut self) {
        if self.listeners.is_none() {
            return;
        }
        self.interaction.teardown();
        self.listeners = None;
        info!("Panel closed");
    }

    /// Launcher click: open if closed, close if open.
    pub fn toggle(&mut self) {
        match self.state() {
            PanelState::Closed => self.open(),
            PanelState::Open => self.close(),
        }
    }

    /// Route a pointer-down on one of the panel's elements.
    ///
    /// Returns `true` if a drag or resize session started.
    pub fn pointer_down(&mut self, target: PointerTarget, pointer: PointerPosition) -> bool {
        if self.listeners.is_none() || self.is_mobile() {
            return false;
        }
        let Some(current) = self.settings else {
            return false;
        };
        match target {
            PointerTarget::Header => self.interaction.begin_drag(pointer, current),
            PointerTarget::ResizeHandle => self.interaction.begin_resize(pointer, current),
            PointerTarget::Body => false,
        }
    }

    /// Global pointer-move listener.
    pub fn pointer_move(&mut self, pointer: PointerPosition) {
        if self.listeners.is_none() {
            return;
        }
        self.interaction.on_pointer_move(pointer);
    }

    /// Global pointer-up listener: ends the session and commits its layout.
    ///
    /// Returns the saved layout, or `None` if no session was active.
    pub fn pointer_up(&mut self, pointer: PointerPosition) -> Option<LayoutSettings> {
        self.listeners.as_ref()?;
        let ended = self
            .interaction
            .end_interaction(pointer, self.viewport.viewport())?;

        // Opacity is its own control; keep whatever was set mid-gesture.
        let committed = match self.settings {
            Some(current) => LayoutSettings {
                opacity: current.opacity,
                ..ended
            },
            None => ended,
        };
        self.store.save(committed);
        self.settings = Some(committed);
        Some(committed)
    }

    /// Deliver a fired frame callback. `surface` is `None` once the panel
    /// element is gone.
    pub fn animation_frame<P: PanelSurface + ?Sized>(
        &mut self,
        frame: FrameId,
        surface: Option<&mut P>,
    ) -> FrameOutcome {
        let viewport = self.viewport.viewport();
        self.interaction.on_animation_frame(frame, surface, viewport)
    }

    /// Set opacity directly. Clamped and saved immediately.
    ///
    /// Returns the stored value.
    pub fn set_opacity(&mut self, opacity: f64) -> f64 {
        let current = match self.settings {
            Some(settings) => settings,
            None => self.store.load(self.viewport.viewport()),
        };
        let opacity = self.store.bounds().clamp_opacity(opacity);
        let updated = LayoutSettings { opacity, ..current };
        self.store.save(updated);
        self.settings = Some(updated);
        debug!(opacity, "Panel opacity changed");
        opacity
    }

    /// Open or closed.
    pub fn state(&self) -> PanelState {
        if self.listeners.is_some() {
            PanelState::Open
        } else {
            PanelState::Closed
        }
    }

    /// Current gesture mode.
    pub fn mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    /// Whether the frame writer currently owns the element geometry.
    pub fn is_interacting(&self) -> bool {
        self.interaction.mode() != InteractionMode::Idle
    }

    /// Whether the viewport is below the mobile breakpoint.
    pub fn is_mobile(&self) -> bool {
        self.viewport.viewport().width < self.options.mobile_breakpoint
    }

    /// Layout the host should render, or `None` while closed.
    ///
    /// The fullscreen override is presentational only and never reaches the
    /// store.
    pub fn presentation(&self) -> Option<Presentation> {
        if self.listeners.is_none() {
            return None;
        }
        let viewport = self.viewport.viewport();
        if viewport.width < self.options.mobile_breakpoint {
            return Some(Presentation::Fullscreen(viewport));
        }
        self.settings.map(Presentation::Floating)
    }

    /// Last committed layout, if the panel has been opened.
    pub fn settings(&self) -> Option<LayoutSettings> {
        self.settings
    }

    /// Layout store.
    pub fn store(&self) -> &LayoutSettingsStore<S> {
        &self.store
    }

    /// Interaction controller.
    pub fn interaction(&self) -> &PointerInteractionController<F> {
        &self.interaction
    }

    /// Mutable interaction controller, for hosts that drive the scheduler.
    pub fn interaction_mut(&mut self) -> &mut PointerInteractionController<F> {
        &mut self.interaction
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
