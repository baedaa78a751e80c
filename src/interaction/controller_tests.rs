//! Tests for pointer interaction and frame coalescing.

use super::*;
use crate::interaction::frame::ManualFrameScheduler;
use crate::interaction::surface::RecordedSurface;
use crate::model::{Point, Size};

// ===== Test Helpers =====

const VIEWPORT: Viewport = Viewport::new(1200.0, 800.0);

fn controller() -> PointerInteractionController<ManualFrameScheduler> {
    PointerInteractionController::new(ManualFrameScheduler::new(), LayoutBounds::default())
}

fn layout(x: f64, y: f64, width: f64, height: f64) -> LayoutSettings {
    LayoutSettings::new(Point::new(x, y), Size::new(width, height), 1.0)
}

fn surface_for(settings: LayoutSettings) -> RecordedSurface {
    RecordedSurface::new(settings.position, settings.size)
}

/// Fire every outstanding frame, as one display refresh would.
fn fire_frames(
    ctl: &mut PointerInteractionController<ManualFrameScheduler>,
    surface: &mut RecordedSurface,
    viewport: Viewport,
) -> Vec<FrameOutcome> {
    let due = ctl.scheduler_mut().take_due();
    due.into_iter()
        .map(|frame| ctl.on_animation_frame(frame, Some(&mut *surface), viewport))
        .collect()
}

// ===== begin Tests =====

#[test]
fn begin_drag_enters_dragging_mode() {
    let mut ctl = controller();
    assert_eq!(ctl.mode(), InteractionMode::Idle);

    assert!(ctl.begin_drag(Point::new(5.0, 5.0), layout(10.0, 10.0, 320.0, 384.0)));

    assert_eq!(ctl.mode(), InteractionMode::Dragging);
    let session = ctl.session().expect("session active");
    assert_eq!(session.origin(), Point::new(5.0, 5.0));
    assert_eq!(session.base(), layout(10.0, 10.0, 320.0, 384.0));
}

#[test]
fn begin_resize_enters_resizing_mode() {
    let mut ctl = controller();
    assert!(ctl.begin_resize(Point::new(5.0, 5.0), layout(10.0, 10.0, 320.0, 384.0)));
    assert_eq!(ctl.mode(), InteractionMode::Resizing);
}

#[test]
fn begin_while_active_does_not_overwrite_session() {
    let mut ctl = controller();
    ctl.begin_drag(Point::new(5.0, 5.0), layout(10.0, 10.0, 320.0, 384.0));

    assert!(!ctl.begin_drag(Point::new(99.0, 99.0), layout(50.0, 50.0, 400.0, 400.0)));
    assert!(!ctl.begin_resize(Point::new(99.0, 99.0), layout(50.0, 50.0, 400.0, 400.0)));

    let session = ctl.session().expect("session active");
    assert_eq!(ctl.mode(), InteractionMode::Dragging);
    assert_eq!(session.origin(), Point::new(5.0, 5.0));
    assert_eq!(session.base(), layout(10.0, 10.0, 320.0, 384.0));
}

// ===== on_pointer_move Tests =====

#[test]
fn move_while_idle_is_noop() {
    let mut ctl = controller();
    ctl.on_pointer_move(Point::new(100.0, 100.0));
    assert!(!ctl.has_pending_frame());
    assert_eq!(ctl.scheduler().requested_count(), 0);
}

#[test]
fn many_moves_in_one_frame_request_one_frame_and_apply_last() {
    let mut ctl = controller();
    let start = layout(100.0, 100.0, 320.0, 384.0);
    let mut surface = surface_for(start);
    ctl.begin_drag(Point::new(0.0, 0.0), start);

    for i in 1..=50 {
        ctl.on_pointer_move(Point::new(i as f64, i as f64 * 2.0));
    }

    assert_eq!(ctl.scheduler().requested_count(), 1);
    assert_eq!(ctl.scheduler().outstanding().len(), 1);

    let outcomes = fire_frames(&mut ctl, &mut surface, VIEWPORT);
    assert_eq!(
        outcomes,
        vec![FrameOutcome::Applied(GeometryWrite::Position(Point::new(150.0, 200.0)))]
    );
    assert_eq!(surface.writes().len(), 1);
}

#[test]
fn next_move_after_frame_requests_new_frame() {
    let mut ctl = controller();
    let start = layout(100.0, 100.0, 320.0, 384.0);
    let mut surface = surface_for(start);
    ctl.begin_drag(Point::new(0.0, 0.0), start);

    ctl.on_pointer_move(Point::new(1.0, 1.0));
    fire_frames(&mut ctl, &mut surface, VIEWPORT);
    ctl.on_pointer_move(Point::new(2.0, 2.0));
    fire_frames(&mut ctl, &mut surface, VIEWPORT);

    assert_eq!(ctl.scheduler().requested_count(), 2);
    assert_eq!(
        surface.writes(),
        &[
            GeometryWrite::Position(Point::new(101.0, 101.0)),
            GeometryWrite::Position(Point::new(102.0, 102.0)),
        ]
    );
}

#[test]
fn drag_frame_clamps_against_viewport_read_at_apply_time() {
    let mut ctl = controller();
    let start = layout(100.0, 100.0, 320.0, 384.0);
    let mut surface = surface_for(start);
    ctl.begin_drag(Point::new(0.0, 0.0), start);

    ctl.on_pointer_move(Point::new(900.0, 900.0));
    // Window shrank between the move and the frame.
    let outcomes = fire_frames(&mut ctl, &mut surface, Viewport::new(800.0, 600.0));

    assert_eq!(
        outcomes,
        vec![FrameOutcome::Applied(GeometryWrite::Position(Point::new(480.0, 216.0)))]
    );
}

#[test]
fn drag_frame_clamps_against_rendered_size() {
    let mut ctl = controller();
    let start = layout(0.0, 0.0, 320.0, 384.0);
    // Host renders the panel larger than the committed size.
    let mut surface = RecordedSurface::new(start.position, Size::new(500.0, 500.0));
    ctl.begin_drag(Point::new(0.0, 0.0), start);

    ctl.on_pointer_move(Point::new(5000.0, 5000.0));
    fire_frames(&mut ctl, &mut surface, VIEWPORT);

    assert_eq!(surface.position(), Point::new(700.0, 300.0));
}

#[test]
fn resize_frame_writes_clamped_size_only() {
    let mut ctl = controller();
    let start = layout(10.0, 10.0, 320.0, 384.0);
    let mut surface = surface_for(start);
    ctl.begin_resize(Point::new(400.0, 400.0), start);

    ctl.on_pointer_move(Point::new(1400.0, 1400.0));
    fire_frames(&mut ctl, &mut surface, VIEWPORT);

    assert_eq!(surface.writes(), &[GeometryWrite::Size(Size::new(600.0, 600.0))]);
    assert_eq!(surface.position(), Point::new(10.0, 10.0));
}

// ===== on_animation_frame Tests =====

#[test]
fn frame_with_missing_surface_is_dropped_silently() {
    let mut ctl = controller();
    ctl.begin_drag(Point::new(0.0, 0.0), layout(0.0, 0.0, 320.0, 384.0));
    ctl.on_pointer_move(Point::new(10.0, 10.0));

    let frame = ctl.scheduler_mut().take_due()[0];
    let outcome = ctl.on_animation_frame::<RecordedSurface>(frame, None, VIEWPORT);

    assert_eq!(outcome, FrameOutcome::Dropped);
    assert!(!ctl.has_pending_frame());
}

#[test]
fn cancelled_frame_firing_late_is_stale() {
    let mut ctl = controller();
    let start = layout(0.0, 0.0, 320.0, 384.0);
    let mut surface = surface_for(start);
    ctl.begin_drag(Point::new(0.0, 0.0), start);
    ctl.on_pointer_move(Point::new(10.0, 10.0));
    let frame = ctl.scheduler().outstanding()[0];

    ctl.end_interaction(Point::new(10.0, 10.0), VIEWPORT);
    let outcome = ctl.on_animation_frame(frame, Some(&mut surface), VIEWPORT);

    assert_eq!(outcome, FrameOutcome::Stale);
    assert!(surface.writes().is_empty());
}

// ===== end_interaction Tests =====

#[test]
fn end_interaction_cancels_pending_frame_and_returns_to_idle() {
    let mut ctl = controller();
    ctl.begin_drag(Point::new(0.0, 0.0), layout(0.0, 0.0, 320.0, 384.0));
    ctl.on_pointer_move(Point::new(10.0, 10.0));

    let result = ctl.end_interaction(Point::new(20.0, 30.0), VIEWPORT);

    assert_eq!(result, Some(layout(20.0, 30.0, 320.0, 384.0)));
    assert_eq!(ctl.mode(), InteractionMode::Idle);
    assert!(!ctl.has_pending_frame());
    assert!(ctl.scheduler().outstanding().is_empty());
    assert_eq!(ctl.scheduler().cancelled_count(), 1);
}

#[test]
fn end_interaction_while_idle_returns_none() {
    let mut ctl = controller();
    assert_eq!(ctl.end_interaction(Point::new(1.0, 1.0), VIEWPORT), None);
}

#[test]
fn drag_past_corner_clamps_final_position() {
    let mut ctl = controller();
    ctl.begin_drag(Point::new(500.0, 500.0), layout(1000.0, 700.0, 320.0, 384.0));

    let result = ctl
        .end_interaction(Point::new(800.0, 800.0), VIEWPORT)
        .expect("session active");

    assert_eq!(result.position, Point::new(880.0, 416.0));
    assert_eq!(result.size, Size::new(320.0, 384.0));
}

#[test]
fn huge_resize_clamps_final_size_to_maximum() {
    let mut ctl = controller();
    ctl.begin_resize(Point::new(0.0, 0.0), layout(0.0, 0.0, 320.0, 384.0));

    let result = ctl
        .end_interaction(Point::new(1000.0, 1000.0), Viewport::new(1920.0, 1080.0))
        .expect("session active");

    assert_eq!(result.size, Size::new(600.0, 600.0));
    assert_eq!(result.position, Point::new(0.0, 0.0));
}

#[test]
fn resize_never_moves_panel_that_still_fits() {
    let mut ctl = controller();
    ctl.begin_resize(Point::new(0.0, 0.0), layout(100.0, 100.0, 320.0, 384.0));

    let result = ctl
        .end_interaction(Point::new(-500.0, -500.0), VIEWPORT)
        .expect("session active");

    assert_eq!(result.size, Size::new(280.0, 300.0));
    assert_eq!(result.position, Point::new(100.0, 100.0));
}

#[test]
fn new_session_allowed_after_end() {
    let mut ctl = controller();
    ctl.begin_drag(Point::new(0.0, 0.0), layout(0.0, 0.0, 320.0, 384.0));
    ctl.end_interaction(Point::new(0.0, 0.0), VIEWPORT);

    assert!(ctl.begin_resize(Point::new(0.0, 0.0), layout(0.0, 0.0, 320.0, 384.0)));
}

// ===== teardown Tests =====

#[test]
fn teardown_discards_session_and_cancels_frame() {
    let mut ctl = controller();
    ctl.begin_resize(Point::new(0.0, 0.0), layout(0.0, 0.0, 320.0, 384.0));
    ctl.on_pointer_move(Point::new(10.0, 10.0));

    ctl.teardown();

    assert_eq!(ctl.mode(), InteractionMode::Idle);
    assert!(ctl.scheduler().outstanding().is_empty());
}

#[test]
fn dropping_controller_cancels_pending_frame() {
    let mut scheduler = ManualFrameScheduler::new();
    {
        let mut ctl = PointerInteractionController::new(&mut scheduler, LayoutBounds::default());
        ctl.begin_drag(Point::new(0.0, 0.0), layout(0.0, 0.0, 320.0, 384.0));
        ctl.on_pointer_move(Point::new(10.0, 10.0));
    }
    assert!(scheduler.outstanding().is_empty());
    assert_eq!(scheduler.cancelled_count(), 1);
}
