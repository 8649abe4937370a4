use approx::assert_relative_eq;
use station_carousel::api::{CarouselConfig, CarouselController};
use station_carousel::core::{StationCatalog, Viewport};
use station_carousel::interaction::{CarouselMode, LoopStrategy, ManualScheduler, ScrollCommand};
use station_carousel::CarouselError;
use std::time::Duration;

const STRIDE: f64 = 316.0;

fn mounted(strategy: LoopStrategy) -> CarouselController<ManualScheduler> {
    let config = CarouselConfig::new(Viewport::new(400, 340)).with_loop_strategy(strategy);
    let mut controller =
        CarouselController::new(StationCatalog::builtin(), config, ManualScheduler::new())
            .expect("controller init");
    controller.mount().expect("mount");
    controller
}

#[test]
fn drag_begin_cancels_auto_advance() {
    let mut controller = mounted(LoopStrategy::Modulo);
    controller.on_drag_begin().expect("drag");

    assert_eq!(controller.mode(), CarouselMode::UserDragging);
    assert!(!controller.is_timer_armed());
    assert_eq!(controller.scheduler().live_count(), 0);
    assert!(controller.scheduler_mut().advance(Duration::from_secs(60)).is_empty());
}

#[test]
fn drag_interrupts_running_animation() {
    let mut controller = mounted(LoopStrategy::Modulo);
    let fired = controller.scheduler_mut().advance(Duration::from_millis(4_000));
    controller.on_timer_fired(fired[0]).expect("fire");
    assert!(controller.is_animating());

    controller.on_drag_begin().expect("drag");
    controller.on_scroll(120.0).expect("scroll");
    assert!(!controller.is_animating());
    assert_eq!(controller.scroll_offset(), 120.0);
}

#[test]
fn modulo_settle_past_last_card_resnaps_to_first_and_resumes() {
    let mut controller = mounted(LoopStrategy::Modulo);
    let first_handle = controller.timer_handle().expect("armed");

    controller.on_drag_begin().expect("drag");
    controller.on_scroll(6.0 * STRIDE).expect("scroll");
    controller.on_momentum_end(6.0 * STRIDE).expect("settle");

    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.scroll_offset(), 0.0);
    assert_eq!(
        controller.last_scroll_command(),
        Some(ScrollCommand {
            offset: 0.0,
            animated: false
        })
    );
    assert_eq!(controller.mode(), CarouselMode::AutoAdvancing);
    assert!(controller.is_timer_armed());
    assert_ne!(controller.timer_handle(), Some(first_handle));
    assert_eq!(controller.scheduler().live_count(), 1);

    let fired = controller.scheduler_mut().advance(Duration::from_millis(4_000));
    assert_eq!(fired.len(), 1);
    controller.on_timer_fired(fired[0]).expect("fire");
    assert_eq!(controller.current_index(), 1);
}

#[test]
fn modulo_settle_before_first_card_resnaps_to_last() {
    let mut controller = mounted(LoopStrategy::Modulo);
    controller.on_drag_begin().expect("drag");
    controller.on_momentum_end(-STRIDE).expect("settle");

    assert_eq!(controller.current_index(), 5);
    assert_relative_eq!(controller.scroll_offset(), 5.0 * STRIDE);
    assert_eq!(controller.last_scroll_command().map(|c| c.animated), Some(false));
}

#[test]
fn padded_settle_on_leading_sentinel_jumps_to_last_real_card() {
    let mut controller = mounted(LoopStrategy::PaddedSentinels);
    controller.on_drag_begin().expect("drag");
    controller.on_momentum_end(0.0).expect("settle");

    assert_eq!(controller.current_slot(), 6);
    assert_eq!(controller.current_index(), 5);
    assert_relative_eq!(controller.scroll_offset(), 6.0 * STRIDE);
    assert!(!controller.is_animating());
    assert_eq!(controller.last_scroll_command().map(|c| c.animated), Some(false));
}

#[test]
fn padded_settle_on_trailing_sentinel_jumps_to_first_real_card() {
    let mut controller = mounted(LoopStrategy::PaddedSentinels);
    controller.on_drag_begin().expect("drag");
    controller.on_momentum_end(7.0 * STRIDE).expect("settle");

    assert_eq!(controller.current_slot(), 1);
    assert_eq!(controller.current_index(), 0);
    assert_relative_eq!(controller.scroll_offset(), STRIDE);
    assert_eq!(
        controller.last_scroll_command(),
        Some(ScrollCommand {
            offset: STRIDE,
            animated: false
        })
    );
}

#[test]
fn misaligned_settle_snaps_with_animation_to_nearest_card() {
    let mut controller = mounted(LoopStrategy::Modulo);
    controller.on_drag_begin().expect("drag");
    controller.on_momentum_end(2.0 * STRIDE + 40.0).expect("settle");

    assert_eq!(controller.current_index(), 2);
    assert!(controller.is_animating());
    assert_relative_eq!(controller.target_offset(), 2.0 * STRIDE);
    assert_eq!(controller.last_scroll_command().map(|c| c.animated), Some(true));

    controller.step_animation(1.0).expect("step");
    assert_relative_eq!(controller.scroll_offset(), 2.0 * STRIDE);
}

#[test]
fn aligned_settle_issues_no_scroll_command() {
    let mut controller = mounted(LoopStrategy::Modulo);
    let before = controller.last_scroll_command();
    controller.on_drag_begin().expect("drag");
    controller.on_momentum_end(3.0 * STRIDE).expect("settle");

    assert_eq!(controller.current_index(), 3);
    assert_eq!(controller.last_scroll_command(), before);
    assert!(!controller.is_animating());
}

#[test]
fn dot_press_scrolls_animated_and_rearms_timer() {
    let mut controller = mounted(LoopStrategy::PaddedSentinels);
    controller.on_dot_pressed(3).expect("dot");

    assert_eq!(controller.current_index(), 3);
    assert_eq!(controller.current_slot(), 4);
    assert_relative_eq!(controller.target_offset(), 4.0 * STRIDE);
    assert_eq!(controller.last_scroll_command().map(|c| c.animated), Some(true));
    assert_eq!(controller.mode(), CarouselMode::AutoAdvancing);

    let scheduler = controller.scheduler();
    assert_eq!(scheduler.live_count(), 1);
    assert_eq!(scheduler.armed_total(), 2);
    assert_eq!(scheduler.cancelled_total(), 1);
}

#[test]
fn dot_press_restarts_the_auto_advance_period() {
    let mut controller = mounted(LoopStrategy::Modulo);
    controller
        .scheduler_mut()
        .advance(Duration::from_millis(3_000));
    controller.on_dot_pressed(2).expect("dot");

    assert!(controller
        .scheduler_mut()
        .advance(Duration::from_millis(3_000))
        .is_empty());
    let fired = controller.scheduler_mut().advance(Duration::from_millis(1_000));
    assert_eq!(fired.len(), 1);
    controller.on_timer_fired(fired[0]).expect("fire");
    assert_eq!(controller.current_index(), 3);
}

#[test]
fn out_of_range_dot_index_wraps() {
    let mut controller = mounted(LoopStrategy::Modulo);
    controller.on_dot_pressed(8).expect("dot");
    assert_eq!(controller.current_index(), 2);
}

#[test]
fn dot_visuals_follow_settled_index() {
    let mut controller = mounted(LoopStrategy::PaddedSentinels);
    controller.on_dot_pressed(3).expect("dot");
    controller.step_animation(1.0).expect("step");

    let active = controller.dot_visuals(3);
    assert_relative_eq!(active.width, 18.0);
    assert_relative_eq!(active.opacity, 1.0);
    let inactive = controller.dot_visuals(2);
    assert_relative_eq!(inactive.width, 6.0);
    assert_relative_eq!(inactive.opacity, 0.25);
}

#[test]
fn dot_hit_test_maps_pointer_to_station() {
    let mut controller = mounted(LoopStrategy::PaddedSentinels);
    controller.on_dot_pressed(3).expect("dot");
    controller.step_animation(1.0).expect("step");

    let rects = controller.dot_rects();
    assert_eq!(rects.len(), 6);
    // 5 * 6 + 18 wide plus 5 gaps of 8, centered in 400.
    assert_relative_eq!(rects[0].x, 156.0);
    assert_relative_eq!(rects[3].width, 18.0);
    assert_relative_eq!(rects[0].y, 24.0 + 260.0 + 20.0);

    let center = &rects[4];
    assert_eq!(
        controller.dot_at(center.x + center.width / 2.0, center.y + center.height / 2.0),
        Some(4)
    );
    assert_eq!(controller.dot_at(5.0, 5.0), None);
}

#[test]
fn card_visuals_focus_the_resting_card() {
    let controller = mounted(LoopStrategy::PaddedSentinels);

    let focused = controller.card_visuals(1);
    assert_relative_eq!(focused.scale, 1.0);
    assert_relative_eq!(focused.translate_y, 0.0);
    let neighbour = controller.card_visuals(2);
    assert_relative_eq!(neighbour.scale, 0.9);
    assert_relative_eq!(neighbour.translate_y, 10.0);
    let far = controller.card_visuals(5);
    assert_relative_eq!(far.scale, 0.9);
}

#[test]
fn card_visuals_blend_halfway_between_slots() {
    let mut controller = mounted(LoopStrategy::Modulo);
    controller.on_drag_begin().expect("drag");
    controller.on_scroll(STRIDE / 2.0).expect("scroll");

    let leaving = controller.card_visuals(0);
    let arriving = controller.card_visuals(1);
    assert_relative_eq!(leaving.scale, 0.95, epsilon = 1e-9);
    assert_relative_eq!(arriving.scale, 0.95, epsilon = 1e-9);
    assert_relative_eq!(leaving.translate_y, 5.0, epsilon = 1e-9);
}

#[test]
fn non_finite_gesture_input_is_rejected() {
    let mut controller = mounted(LoopStrategy::Modulo);
    assert!(matches!(
        controller.on_scroll(f64::NAN),
        Err(CarouselError::InvalidData(_))
    ));
    assert!(matches!(
        controller.on_momentum_end(f64::INFINITY),
        Err(CarouselError::InvalidData(_))
    ));
    assert!(matches!(
        controller.step_animation(-1.0),
        Err(CarouselError::InvalidData(_))
    ));
    assert_eq!(controller.current_index(), 0);
}
