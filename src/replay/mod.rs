//! Pointer trace replay (impure shell).
//!
//! A trace is JSONL, one event per line, tagged by `"type"`:
//!
//! ```text
//! {"type":"open"}
//! {"type":"pointer_down","target":"header","x":900,"y":400}
//! {"type":"pointer_move","x":880,"y":390}
//! {"type":"frame"}
//! {"type":"pointer_up","x":870,"y":380}
//! {"type":"viewport","width":800,"height":600}
//! {"type":"opacity","value":0.6}
//! {"type":"unmount"}
//! {"type":"close"}
//! ```
//!
//! Malformed lines are reported with their line number and skipped.

pub mod host;

pub use host::{ReplayHost, ReplayReport};

use crate::model::{Point, TraceError, Viewport};
use crate::panel::PointerTarget;
use serde::Deserialize;

/// Raw pointer target names in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawTarget {
    Header,
    ResizeHandle,
    Body,
}

impl From<RawTarget> for PointerTarget {
    fn from(raw: RawTarget) -> Self {
        match raw {
            RawTarget::Header => PointerTarget::Header,
            RawTarget::ResizeHandle => PointerTarget::ResizeHandle,
            RawTarget::Body => PointerTarget::Body,
        }
    }
}

/// Raw JSON structure for deserializing trace lines.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawEvent {
    Open,
    Close,
    Toggle,
    PointerDown { target: RawTarget, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    Frame,
    Unmount,
    Viewport { width: f64, height: f64 },
    Opacity { value: f64 },
}

/// One host-side event in a pointer trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEvent {
    /// Launcher clicked while closed.
    Open,
    /// Close or minimize clicked.
    Close,
    /// Launcher clicked.
    Toggle,
    /// Pointer pressed on a panel element.
    PointerDown(PointerTarget, Point),
    /// Global pointer move.
    PointerMove(Point),
    /// Global pointer release.
    PointerUp(Point),
    /// Display refresh: deliver every due frame callback.
    Frame,
    /// Panel element removed from the page without closing.
    Unmount,
    /// Window resized.
    Viewport(Viewport),
    /// Opacity control changed.
    Opacity(f64),
}

impl From<RawEvent> for TraceEvent {
    fn from(raw: RawEvent) -> Self {
        match raw {
            RawEvent::Open => TraceEvent::Open,
            RawEvent::Close => TraceEvent::Close,
            RawEvent::Toggle => TraceEvent::Toggle,
            RawEvent::PointerDown { target, x, y } => {
                TraceEvent::PointerDown(target.into(), Point::new(x, y))
            }
            RawEvent::PointerMove { x, y } => TraceEvent::PointerMove(Point::new(x, y)),
            RawEvent::PointerUp { x, y } => TraceEvent::PointerUp(Point::new(x, y)),
            RawEvent::Frame => TraceEvent::Frame,
            RawEvent::Unmount => TraceEvent::Unmount,
            RawEvent::Viewport { width, height } => {
                TraceEvent::Viewport(Viewport::new(width, height))
            }
            RawEvent::Opacity { value } => TraceEvent::Opacity(value),
        }
    }
}

/// Parse one trace line.
///
/// # Errors
///
/// Returns [`TraceError::InvalidEvent`] carrying `line_number` when the line
/// is not valid JSON or not a known event.
pub fn parse_event(line: &str, line_number: usize) -> Result<TraceEvent, TraceError> {
    serde_json::from_str::<RawEvent>(line)
        .map(TraceEvent::from)
        .map_err(|err| TraceError::InvalidEvent {
            line: line_number,
            message: err.to_string(),
        })
}

/// Parse trace lines, collecting events and errors separately.
///
/// Blank lines are skipped. `starting_line_number` is the 1-based number of
/// the first line, used in error reports.
pub fn process_lines<I, L>(lines: I, starting_line_number: usize) -> (Vec<TraceEvent>, Vec<TraceError>)
where
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    let mut events = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        match parse_event(line, starting_line_number + index) {
            Ok(event) => events.push(event),
            Err(err) => errors.push(err),
        }
    }

    (events, errors)
}
