use tracing::{debug, trace, warn};

use crate::core::{CardVisuals, CarouselGeometry, DotVisuals, StationCatalog};
use crate::error::{CarouselError, CarouselResult};
use crate::interaction::{
    AutoAdvanceScheduler, CarouselMode, IndexSpace, ScrollAnimation, ScrollCommand, TimerHandle,
    wrap_index,
};

use super::CarouselConfig;

/// Offsets closer than this to a slot are treated as resting on it.
const SNAP_EPSILON_PX: f64 = 0.5;

/// Every input the carousel reacts to.
///
/// Timer fires and gestures both funnel through
/// [`CarouselController::dispatch`], so a drag that begins on the same tick a
/// timer fires is applied in arrival order instead of racing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    /// Widget attached: rest on the first real card and start auto-advance.
    Mount,
    /// Re-arm auto-advance without moving.
    Start,
    /// Disarm auto-advance and go idle.
    Stop,
    /// Widget detached: disarm and drop the scroll surface.
    Teardown,
    TimerFired(TimerHandle),
    DragBegin,
    /// High-frequency offset sample from the scroll surface.
    Scrolled { offset: f64 },
    /// Momentum scroll came to rest at `offset`.
    MomentumEnd { offset: f64 },
    /// Pagination dot for station `index` was activated.
    DotPressed { index: usize },
    /// Host frame tick driving programmatic scroll animation.
    AnimationFrame { delta_seconds: f64 },
}

/// Auto-advancing station carousel.
///
/// Owns the scroll offset, the current slot and at most one armed
/// auto-advance timer. The scheduler is injected so hosts (and tests) decide
/// how time passes.
#[derive(Debug)]
pub struct CarouselController<S: AutoAdvanceScheduler> {
    config: CarouselConfig,
    catalog: StationCatalog,
    geometry: CarouselGeometry,
    index_space: IndexSpace,
    scheduler: S,
    mode: CarouselMode,
    timer: Option<TimerHandle>,
    mounted: bool,
    current_slot: usize,
    scroll_offset: f64,
    animation: Option<ScrollAnimation>,
    last_command: Option<ScrollCommand>,
}

impl<S: AutoAdvanceScheduler> CarouselController<S> {
    pub fn new(catalog: StationCatalog, config: CarouselConfig, scheduler: S) -> CarouselResult<Self> {
        let config = config.validate()?;
        let geometry = config.geometry()?;
        let index_space = IndexSpace::new(config.loop_strategy, catalog.len())?;
        let current_slot = index_space.initial_slot();

        debug!(
            stations = catalog.len(),
            strategy = ?config.loop_strategy,
            stride = geometry.stride(),
            "create carousel controller"
        );

        Ok(Self {
            config,
            catalog,
            geometry,
            index_space,
            scheduler,
            mode: CarouselMode::Idle,
            timer: None,
            mounted: false,
            current_slot,
            scroll_offset: geometry.offset_for_slot(current_slot),
            animation: None,
            last_command: None,
        })
    }

    /// Single entry point of the state machine.
    pub fn dispatch(&mut self, event: CarouselEvent) -> CarouselResult<()> {
        match event {
            CarouselEvent::Mount => self.handle_mount(),
            CarouselEvent::Start => self.handle_start(),
            CarouselEvent::Stop => self.handle_stop(),
            CarouselEvent::Teardown => self.handle_teardown(),
            CarouselEvent::TimerFired(handle) => self.handle_timer_fired(handle),
            CarouselEvent::DragBegin => self.handle_drag_begin(),
            CarouselEvent::Scrolled { offset } => {
                validate_offset(offset)?;
                self.handle_scrolled(offset);
            }
            CarouselEvent::MomentumEnd { offset } => {
                validate_offset(offset)?;
                self.handle_momentum_end(offset);
            }
            CarouselEvent::DotPressed { index } => self.handle_dot_pressed(index),
            CarouselEvent::AnimationFrame { delta_seconds } => {
                if !delta_seconds.is_finite() || delta_seconds < 0.0 {
                    return Err(CarouselError::InvalidData(
                        "animation frame delta must be finite and >= 0".to_owned(),
                    ));
                }
                self.handle_animation_frame(delta_seconds);
            }
        }
        Ok(())
    }

    pub fn mount(&mut self) -> CarouselResult<()> {
        self.dispatch(CarouselEvent::Mount)
    }

    pub fn start(&mut self) -> CarouselResult<()> {
        self.dispatch(CarouselEvent::Start)
    }

    pub fn stop(&mut self) -> CarouselResult<()> {
        self.dispatch(CarouselEvent::Stop)
    }

    pub fn teardown(&mut self) -> CarouselResult<()> {
        self.dispatch(CarouselEvent::Teardown)
    }

    pub fn on_timer_fired(&mut self, handle: TimerHandle) -> CarouselResult<()> {
        self.dispatch(CarouselEvent::TimerFired(handle))
    }

    pub fn on_drag_begin(&mut self) -> CarouselResult<()> {
        self.dispatch(CarouselEvent::DragBegin)
    }

    pub fn on_scroll(&mut self, offset: f64) -> CarouselResult<()> {
        self.dispatch(CarouselEvent::Scrolled { offset })
    }

    pub fn on_momentum_end(&mut self, offset: f64) -> CarouselResult<()> {
        self.dispatch(CarouselEvent::MomentumEnd { offset })
    }

    pub fn on_dot_pressed(&mut self, index: usize) -> CarouselResult<()> {
        self.dispatch(CarouselEvent::DotPressed { index })
    }

    /// Advances any programmatic scroll animation.
    ///
    /// Returns `true` while an animation is still running afterwards.
    pub fn step_animation(&mut self, delta_seconds: f64) -> CarouselResult<bool> {
        self.dispatch(CarouselEvent::AnimationFrame { delta_seconds })?;
        Ok(self.animation.is_some())
    }

    fn handle_mount(&mut self) {
        if self.mounted {
            debug!("mount ignored: carousel already mounted");
            return;
        }
        self.mounted = true;
        self.current_slot = self.index_space.initial_slot();
        self.scroll_to_slot(self.current_slot, false);
        self.arm_timer();
        self.mode = CarouselMode::AutoAdvancing;
        debug!(slot = self.current_slot, "carousel mounted");
    }

    fn handle_start(&mut self) {
        if !self.mounted {
            debug!("start ignored: carousel not mounted");
            return;
        }
        self.arm_timer();
        self.mode = CarouselMode::AutoAdvancing;
    }

    fn handle_stop(&mut self) {
        self.cancel_timer();
        self.mode = CarouselMode::Idle;
    }

    fn handle_teardown(&mut self) {
        self.cancel_timer();
        self.mounted = false;
        self.animation = None;
        self.mode = CarouselMode::Idle;
        debug!("carousel torn down");
    }

    fn handle_timer_fired(&mut self, handle: TimerHandle) {
        if self.timer != Some(handle) {
            warn!(
                handle = handle.raw(),
                live = ?self.timer.map(TimerHandle::raw),
                "ignoring fire from a timer the carousel no longer owns"
            );
            return;
        }
        if self.mode != CarouselMode::AutoAdvancing {
            trace!(mode = ?self.mode, "timer fire outside auto-advance ignored");
            return;
        }

        self.finish_animation();
        let next = self.index_space.next_slot(self.current_slot);
        trace!(from = self.current_slot, to = next, "auto-advance");
        self.current_slot = next;
        self.scroll_to_slot(next, true);
    }

    fn handle_drag_begin(&mut self) {
        self.cancel_timer();
        self.animation = None;
        self.mode = CarouselMode::UserDragging;
    }

    fn handle_scrolled(&mut self, offset: f64) {
        trace!(offset, mode = ?self.mode, "scroll sample");
        if self.mode != CarouselMode::UserDragging && self.animation.is_some() {
            // The surface reports the programmatic scroll: land it, and leave a
            // copy card right away.
            self.finish_animation();
            return;
        }
        self.animation = None;
        self.scroll_offset = offset;
    }

    fn handle_momentum_end(&mut self, offset: f64) {
        if !self.mounted {
            debug!("momentum end ignored: carousel not mounted");
            return;
        }
        self.animation = None;
        self.scroll_offset = offset;

        let raw_slot = self.geometry.nearest_slot(offset);
        let settled = self.index_space.settle(raw_slot);
        self.current_slot = settled.slot;

        let target = self.geometry.offset_for_slot(settled.slot);
        if settled.resnapped {
            debug!(raw_slot, slot = settled.slot, "re-snap across loop boundary");
            self.scroll_to_slot(settled.slot, false);
        } else if (target - offset).abs() > SNAP_EPSILON_PX {
            self.scroll_to_slot(settled.slot, true);
        }

        self.arm_timer();
        self.mode = CarouselMode::AutoAdvancing;
    }

    fn handle_dot_pressed(&mut self, index: usize) {
        if !self.mounted {
            debug!(index, "dot press ignored: carousel not mounted");
            return;
        }
        self.cancel_timer();
        let real_index = wrap_index(index as i64, self.index_space.len());
        self.current_slot = self.index_space.slot_for_real(real_index);
        self.scroll_to_slot(self.current_slot, true);
        self.arm_timer();
        self.mode = CarouselMode::AutoAdvancing;
    }

    fn handle_animation_frame(&mut self, delta_seconds: f64) {
        let Some(mut animation) = self.animation else {
            return;
        };
        self.scroll_offset = animation.step(delta_seconds);
        if animation.is_finished() {
            self.animation = None;
            self.settle_on_sentinel();
        } else {
            self.animation = Some(animation);
        }
    }

    /// Jumps a running animation to its end so a new one starts from rest.
    fn finish_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.scroll_offset = animation.target();
            self.settle_on_sentinel();
        }
    }

    fn settle_on_sentinel(&mut self) {
        if !self.index_space.is_sentinel(self.current_slot) {
            return;
        }
        let real_index = self.index_space.real_for_slot(self.current_slot);
        self.current_slot = self.index_space.slot_for_real(real_index);
        debug!(slot = self.current_slot, "re-snap off sentinel");
        self.scroll_to_slot(self.current_slot, false);
    }

    fn scroll_to_slot(&mut self, slot: usize, animated: bool) {
        let offset = self.geometry.offset_for_slot(slot);
        if !self.mounted {
            trace!(offset, "no scroll surface attached; dropping scroll command");
            return;
        }

        self.last_command = Some(ScrollCommand { offset, animated });
        let duration = self.config.scroll_animation();
        if animated && !duration.is_zero() {
            self.animation = Some(ScrollAnimation::new(self.scroll_offset, offset, duration));
        } else {
            self.animation = None;
            self.scroll_offset = offset;
        }
    }

    fn arm_timer(&mut self) {
        self.cancel_timer();
        let handle = self.scheduler.arm(self.config.auto_advance_period());
        trace!(handle = handle.raw(), "auto-advance timer armed");
        self.timer = Some(handle);
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            trace!(handle = handle.raw(), "auto-advance timer cancelled");
            self.scheduler.cancel(handle);
        }
    }

    #[must_use]
    pub fn config(&self) -> CarouselConfig {
        self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn geometry(&self) -> CarouselGeometry {
        self.geometry
    }

    #[must_use]
    pub fn index_space(&self) -> IndexSpace {
        self.index_space
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[must_use]
    pub fn mode(&self) -> CarouselMode {
        self.mode
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Station index currently focused (or being scrolled to).
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index_space.real_for_slot(self.current_slot)
    }

    #[must_use]
    pub fn current_slot(&self) -> usize {
        self.current_slot
    }

    /// Offset as currently displayed, mid-animation included.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Offset the strip is heading to; equals `scroll_offset` when at rest.
    #[must_use]
    pub fn target_offset(&self) -> f64 {
        self.animation
            .map_or(self.scroll_offset, ScrollAnimation::target)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[must_use]
    pub fn timer_handle(&self) -> Option<TimerHandle> {
        self.timer
    }

    #[must_use]
    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    #[must_use]
    pub fn last_scroll_command(&self) -> Option<ScrollCommand> {
        self.last_command
    }

    /// Visual parameters of the card laid out at `slot`.
    #[must_use]
    pub fn card_visuals(&self, slot: usize) -> CardVisuals {
        self.config
            .card_visuals
            .resolve(self.scroll_offset, slot, self.geometry.stride())
    }

    /// Visual parameters of the pagination dot for station `index`.
    #[must_use]
    pub fn dot_visuals(&self, index: usize) -> DotVisuals {
        let slot = self.index_space.slot_for_real(index);
        self.config
            .dot_visuals
            .resolve(self.scroll_offset, slot, self.geometry.stride())
    }
}

fn validate_offset(offset: f64) -> CarouselResult<()> {
    if !offset.is_finite() {
        return Err(CarouselError::InvalidData(
            "scroll offset must be finite".to_owned(),
        ));
    }
    Ok(())
}
