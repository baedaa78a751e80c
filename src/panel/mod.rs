//! Floating panel: open/close state, gesture routing and commit.

pub mod controller;
pub mod listeners;
pub mod viewport;

// Re-export for convenience
pub use controller::{
    FloatingPanelController, PanelOptions, PanelState, PointerTarget, Presentation,
    DEFAULT_MOBILE_BREAKPOINT,
};
pub use listeners::{GlobalPointerEvents, ListenerGuard, ListenerRegistry, SubscriptionId};
pub use viewport::{SharedViewport, ViewportSource};
