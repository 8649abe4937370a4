use tracing::trace;

use crate::error::{CarouselError, CarouselResult};
use crate::interaction::AutoAdvanceScheduler;
use crate::render::{Color, FrameTransform, RectPrimitive, RenderFrame, Renderer};

use super::{CardLayout, CardPalette, CarouselController, build_station_card_frame};

const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
const DOT_TOP_MARGIN_PX: f64 = 20.0;

impl<S: AutoAdvanceScheduler> CarouselController<S> {
    #[must_use]
    pub fn card_layout(&self) -> CardLayout {
        let config = self.config();
        CardLayout {
            width: self.geometry().card_width(),
            height: config.card_height_px,
            trend_width: config.trend_width_px,
            trend_height: config.trend_height_px,
        }
    }

    /// Card for station `index` in card-local coordinates.
    pub fn build_card_frame(&self, index: usize) -> CarouselResult<RenderFrame> {
        let station = self.catalog().get(index).ok_or_else(|| {
            CarouselError::InvalidData(format!(
                "station index {index} out of range for {} stations",
                self.catalog().len()
            ))
        })?;
        build_station_card_frame(station, self.card_layout(), &CardPalette::default())
    }

    /// Full widget scene: every card intersecting the viewport with its
    /// focus visuals applied, followed by the pagination dots.
    pub fn build_render_frame(&self) -> CarouselResult<RenderFrame> {
        let config = self.config();
        let geometry = self.geometry();
        let layout = self.card_layout();
        let palette = CardPalette::default();
        let index_space = self.index_space();
        let viewport_width = geometry.viewport_width();
        let top = config.top_margin_px;

        let mut frame = RenderFrame::new(config.viewport);
        let mut visible_cards = 0_usize;
        for slot in 0..index_space.slot_count() {
            let left = geometry.card_left(slot, self.scroll_offset());
            if left >= viewport_width || left + layout.width <= 0.0 {
                continue;
            }

            let real_index = index_space.real_for_slot(slot);
            let Some(station) = self.catalog().get(real_index) else {
                continue;
            };
            let visuals = self.card_visuals(slot);
            let focus = FrameTransform {
                scale: visuals.scale,
                pivot_x: left + layout.width / 2.0,
                pivot_y: top + layout.height / 2.0,
                translate_x: 0.0,
                translate_y: visuals.translate_y,
                opacity: visuals.opacity,
            };

            if visuals.shadow_opacity > 0.0 && visuals.shadow_radius > 0.0 {
                let spread = visuals.shadow_radius;
                let shadow = RenderFrame::new(config.viewport).with_rect(
                    RectPrimitive::new(
                        left - spread / 2.0,
                        top + visuals.shadow_offset - spread / 2.0,
                        layout.width + spread,
                        layout.height + spread,
                        BLACK.faded(visuals.shadow_opacity),
                    )
                    .with_corner_radius(28.0 + spread / 2.0),
                );
                frame.append(shadow.transformed(focus));
            }

            let card = build_station_card_frame(station, layout, &palette)?
                .transformed(FrameTransform::translation(left, top))
                .transformed(focus);
            frame.append(card);
            visible_cards += 1;
        }

        for (index, rect) in self.dot_rects().into_iter().enumerate() {
            let opacity = self.dot_visuals(index).opacity;
            frame.rects.push(RectPrimitive {
                fill_color: palette.brand.faded(opacity),
                border_color: palette.brand.faded(opacity),
                ..rect
            });
        }

        trace!(
            visible_cards,
            offset = self.scroll_offset(),
            "built carousel frame"
        );
        Ok(frame)
    }

    /// Pagination dot boxes in viewport coordinates, one per station.
    #[must_use]
    pub fn dot_rects(&self) -> Vec<RectPrimitive> {
        let config = self.config();
        let dots = config.dot_visuals;
        let count = self.index_space().len();
        let visuals: Vec<_> = (0..count).map(|index| self.dot_visuals(index)).collect();
        let total_width = visuals.iter().map(|dot| dot.width).sum::<f64>()
            + dots.gap * count.saturating_sub(1) as f64;
        let y = config.top_margin_px + config.card_height_px + DOT_TOP_MARGIN_PX;

        let mut x = (self.geometry().viewport_width() - total_width) / 2.0;
        visuals
            .iter()
            .map(|dot| {
                let rect = RectPrimitive::new(x, y, dot.width, dots.height, BLACK)
                    .with_corner_radius(dots.height / 2.0);
                x += dot.width + dots.gap;
                rect
            })
            .collect()
    }

    /// Station index of the dot under `(x, y)`, with half a gap of slack
    /// around each dot.
    #[must_use]
    pub fn dot_at(&self, x: f64, y: f64) -> Option<usize> {
        let slack = self.config().dot_visuals.gap / 2.0;
        self.dot_rects().iter().position(|rect| {
            x >= rect.x - slack
                && x <= rect.x + rect.width + slack
                && y >= rect.y - slack
                && y <= rect.y + rect.height + slack
        })
    }

    pub fn render_into<R: Renderer>(&self, renderer: &mut R) -> CarouselResult<()> {
        let frame = self.build_render_frame()?;
        renderer.render(&frame)
    }
}
