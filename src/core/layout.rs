use crate::error::{CarouselError, CarouselResult};

/// Horizontal geometry of the card strip.
///
/// Cards are centered in the viewport, so slot `i` is focused when the scroll
/// offset equals `i * stride`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselGeometry {
    viewport_width: f64,
    card_width: f64,
    card_spacing: f64,
}

impl CarouselGeometry {
    pub fn new(viewport_width: f64, card_width_ratio: f64, card_spacing: f64) -> CarouselResult<Self> {
        if !viewport_width.is_finite() || viewport_width <= 0.0 {
            return Err(CarouselError::InvalidConfig(
                "viewport width must be finite and > 0".to_owned(),
            ));
        }
        if !card_width_ratio.is_finite() || card_width_ratio <= 0.0 || card_width_ratio > 1.0 {
            return Err(CarouselError::InvalidConfig(
                "card width ratio must be in (0, 1]".to_owned(),
            ));
        }
        if !card_spacing.is_finite() || card_spacing < 0.0 {
            return Err(CarouselError::InvalidConfig(
                "card spacing must be finite and >= 0".to_owned(),
            ));
        }

        Ok(Self {
            viewport_width,
            card_width: viewport_width * card_width_ratio,
            card_spacing,
        })
    }

    #[must_use]
    pub fn viewport_width(self) -> f64 {
        self.viewport_width
    }

    #[must_use]
    pub fn card_width(self) -> f64 {
        self.card_width
    }

    #[must_use]
    pub fn card_spacing(self) -> f64 {
        self.card_spacing
    }

    #[must_use]
    pub fn stride(self) -> f64 {
        self.card_width + self.card_spacing
    }

    /// Leading/trailing padding that centers the first and last card.
    #[must_use]
    pub fn side_padding(self) -> f64 {
        (self.viewport_width - self.card_width) / 2.0
    }

    #[must_use]
    pub fn offset_for_slot(self, slot: usize) -> f64 {
        slot as f64 * self.stride()
    }

    /// `round(offset / stride)`; may be negative or past the last slot when
    /// the host overscrolls.
    #[must_use]
    pub fn nearest_slot(self, offset: f64) -> i64 {
        (offset / self.stride()).round() as i64
    }

    #[must_use]
    pub fn max_offset(self, slot_count: usize) -> f64 {
        slot_count.saturating_sub(1) as f64 * self.stride()
    }

    /// Viewport x of the left edge of `slot` at the given scroll offset.
    #[must_use]
    pub fn card_left(self, slot: usize, scroll_offset: f64) -> f64 {
        self.side_padding() + self.offset_for_slot(slot) - scroll_offset
    }
}
