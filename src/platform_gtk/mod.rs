use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::{CarouselConfig, CarouselController};
use crate::core::StationCatalog;
use crate::error::CarouselResult;
use crate::interaction::{AutoAdvanceScheduler, TimerHandle};
use crate::render::{CairoContextRenderer, CairoRenderer};

/// Auto-advance scheduler backed by glib main-loop timeouts.
pub struct GlibTimerScheduler {
    next_id: u64,
    live: Vec<(TimerHandle, glib::SourceId)>,
    on_fire: Rc<dyn Fn(TimerHandle)>,
}

impl GlibTimerScheduler {
    #[must_use]
    pub fn new(on_fire: impl Fn(TimerHandle) + 'static) -> Self {
        Self {
            next_id: 0,
            live: Vec::new(),
            on_fire: Rc::new(on_fire),
        }
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl std::fmt::Debug for GlibTimerScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlibTimerScheduler")
            .field("next_id", &self.next_id)
            .field("live", &self.live.len())
            .finish()
    }
}

impl AutoAdvanceScheduler for GlibTimerScheduler {
    fn arm(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        let on_fire = Rc::clone(&self.on_fire);
        let source = glib::timeout_add_local(period, move || {
            on_fire(handle);
            glib::ControlFlow::Continue
        });
        self.live.push((handle, source));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(position) = self.live.iter().position(|(live, _)| *live == handle) {
            let (_, source) = self.live.swap_remove(position);
            source.remove();
        }
    }
}

impl Drop for GlibTimerScheduler {
    fn drop(&mut self) {
        for (_, source) in self.live.drain(..) {
            source.remove();
        }
    }
}

pub type GtkCarouselController = CarouselController<GlibTimerScheduler>;

/// GTK4 embedding of the carousel: a `DrawingArea` painted through Cairo,
/// a drag gesture for swiping, a click gesture for the pagination dots and
/// the frame clock for scroll animation.
pub struct GtkCarouselAdapter {
    controller: Rc<RefCell<GtkCarouselController>>,
    drawing_area: gtk::DrawingArea,
}

impl GtkCarouselAdapter {
    pub fn new(catalog: StationCatalog, config: CarouselConfig) -> CarouselResult<Self> {
        let config = config.validate()?;
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(i32::try_from(config.viewport.width).unwrap_or(i32::MAX));
        drawing_area.set_content_height(i32::try_from(config.viewport.height).unwrap_or(i32::MAX));

        let target: Rc<RefCell<Weak<RefCell<GtkCarouselController>>>> =
            Rc::new(RefCell::new(Weak::new()));
        let scheduler = GlibTimerScheduler::new({
            let target = Rc::clone(&target);
            let area = drawing_area.downgrade();
            move |handle| {
                let controller = target.borrow().upgrade();
                let Some(controller) = controller else {
                    return;
                };
                if let Err(err) = controller.borrow_mut().on_timer_fired(handle) {
                    warn!(error = %err, "auto-advance tick failed");
                }
                if let Some(area) = area.upgrade() {
                    area.queue_draw();
                }
            }
        });

        let controller = Rc::new(RefCell::new(CarouselController::new(
            catalog, config, scheduler,
        )?));
        *target.borrow_mut() = Rc::downgrade(&controller);

        let adapter = Self {
            controller,
            drawing_area,
        };
        adapter.install_draw_func(&config);
        adapter.install_tick_callback();
        adapter.install_gestures();
        adapter.install_lifecycle();
        Ok(adapter)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn controller(&self) -> Rc<RefCell<GtkCarouselController>> {
        Rc::clone(&self.controller)
    }

    fn install_draw_func(&self, config: &CarouselConfig) {
        let renderer = match CairoRenderer::new(
            i32::try_from(config.viewport.width).unwrap_or(i32::MAX),
            i32::try_from(config.viewport.height).unwrap_or(i32::MAX),
        ) {
            Ok(renderer) => Rc::new(RefCell::new(renderer)),
            Err(err) => {
                warn!(error = %err, "cairo renderer unavailable; carousel will not paint");
                return;
            }
        };

        let controller = Rc::clone(&self.controller);
        self.drawing_area
            .set_draw_func(move |_area, context, _width, _height| {
                let frame = match controller.borrow().build_render_frame() {
                    Ok(frame) => frame,
                    Err(err) => {
                        warn!(error = %err, "failed to build carousel frame");
                        return;
                    }
                };
                if let Err(err) = renderer
                    .borrow_mut()
                    .render_on_cairo_context(context, &frame)
                {
                    warn!(error = %err, "failed to paint carousel frame");
                }
            });
    }

    fn install_tick_callback(&self) {
        let controller = Rc::clone(&self.controller);
        let last_frame_us = Cell::new(None::<i64>);
        self.drawing_area.add_tick_callback(move |area, clock| {
            let now = clock.frame_time();
            let previous = last_frame_us.replace(Some(now));
            let Some(previous) = previous else {
                return glib::ControlFlow::Continue;
            };

            let mut controller = controller.borrow_mut();
            if !controller.is_animating() {
                return glib::ControlFlow::Continue;
            }
            let delta_seconds = (now - previous).max(0) as f64 / 1_000_000.0;
            if let Err(err) = controller.step_animation(delta_seconds) {
                warn!(error = %err, "failed to step scroll animation");
            }
            area.queue_draw();
            glib::ControlFlow::Continue
        });
    }

    fn install_gestures(&self) {
        let drag_origin = Rc::new(Cell::new(0.0_f64));
        let drag = gtk::GestureDrag::new();

        drag.connect_drag_begin({
            let controller = Rc::clone(&self.controller);
            let drag_origin = Rc::clone(&drag_origin);
            move |_gesture, _x, _y| {
                let mut controller = controller.borrow_mut();
                drag_origin.set(controller.scroll_offset());
                if let Err(err) = controller.on_drag_begin() {
                    warn!(error = %err, "drag begin rejected");
                }
            }
        });
        drag.connect_drag_update({
            let controller = Rc::clone(&self.controller);
            let drag_origin = Rc::clone(&drag_origin);
            let area = self.drawing_area.downgrade();
            move |_gesture, dx, _dy| {
                let mut controller = controller.borrow_mut();
                let offset = clamp_to_content(&controller, drag_origin.get() - dx);
                if let Err(err) = controller.on_scroll(offset) {
                    warn!(error = %err, "scroll sample rejected");
                }
                if let Some(area) = area.upgrade() {
                    area.queue_draw();
                }
            }
        });
        drag.connect_drag_end({
            let controller = Rc::clone(&self.controller);
            let drag_origin = Rc::clone(&drag_origin);
            let area = self.drawing_area.downgrade();
            move |_gesture, dx, _dy| {
                let mut controller = controller.borrow_mut();
                let offset = clamp_to_content(&controller, drag_origin.get() - dx);
                if let Err(err) = controller.on_momentum_end(offset) {
                    warn!(error = %err, "scroll settle rejected");
                }
                if let Some(area) = area.upgrade() {
                    area.queue_draw();
                }
            }
        });
        self.drawing_area.add_controller(drag);

        let click = gtk::GestureClick::new();
        click.connect_released({
            let controller = Rc::clone(&self.controller);
            let area = self.drawing_area.downgrade();
            move |_gesture, _presses, x, y| {
                let mut controller = controller.borrow_mut();
                let Some(index) = controller.dot_at(x, y) else {
                    return;
                };
                if let Err(err) = controller.on_dot_pressed(index) {
                    warn!(error = %err, "dot press rejected");
                }
                if let Some(area) = area.upgrade() {
                    area.queue_draw();
                }
            }
        });
        self.drawing_area.add_controller(click);
    }

    fn install_lifecycle(&self) {
        self.drawing_area.connect_realize({
            let controller = Rc::clone(&self.controller);
            move |_area| {
                if let Err(err) = controller.borrow_mut().mount() {
                    warn!(error = %err, "carousel mount failed");
                }
            }
        });
        self.drawing_area.connect_unrealize({
            let controller = Rc::clone(&self.controller);
            move |_area| {
                if let Err(err) = controller.borrow_mut().teardown() {
                    warn!(error = %err, "carousel teardown failed");
                }
            }
        });
    }
}

/// A drag cannot pull the strip past its first or last laid-out card.
fn clamp_to_content(controller: &GtkCarouselController, offset: f64) -> f64 {
    let max_offset = controller
        .geometry()
        .max_offset(controller.index_space().slot_count());
    offset.clamp(0.0, max_offset)
}
