//! Floating panel interaction engine (floatpanel)
//!
//! Drag, resize, viewport clamping and persistence for a floating,
//! user-repositionable panel, with pointer moves coalesced to one geometry
//! write per display frame.
//!
//! Pure Core / Impure Shell:
//! - [`model`], [`store`], [`interaction`] and [`panel`] are host-agnostic.
//!   Platform services come in through traits
//!   ([`store::KeyValueStorage`], [`interaction::FrameScheduler`],
//!   [`interaction::PanelSurface`], [`panel::GlobalPointerEvents`],
//!   [`panel::ViewportSource`]).
//! - [`replay`], [`config`] and [`logging`] make up the shell used by the
//!   `floatpanel` binary.

pub mod config;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod panel;
pub mod replay;
pub mod store;
