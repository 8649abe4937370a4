use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{CardVisualProfile, CarouselGeometry, DotVisualProfile, Viewport};
use crate::error::{CarouselError, CarouselResult};
use crate::interaction::LoopStrategy;

/// Public carousel bootstrap configuration.
///
/// Serializable so host applications can persist/load widget setup; every
/// field except the viewport has a default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub viewport: Viewport,
    #[serde(default = "default_card_width_ratio")]
    pub card_width_ratio: f64,
    #[serde(default = "default_card_spacing_px")]
    pub card_spacing_px: f64,
    #[serde(default = "default_card_height_px")]
    pub card_height_px: f64,
    #[serde(default = "default_top_margin_px")]
    pub top_margin_px: f64,
    #[serde(default = "default_auto_advance_period_ms")]
    pub auto_advance_period_ms: u64,
    #[serde(default = "default_scroll_animation_ms")]
    pub scroll_animation_ms: u64,
    #[serde(default)]
    pub loop_strategy: LoopStrategy,
    #[serde(default)]
    pub card_visuals: CardVisualProfile,
    #[serde(default)]
    pub dot_visuals: DotVisualProfile,
    #[serde(default = "default_trend_width_px")]
    pub trend_width_px: f64,
    #[serde(default = "default_trend_height_px")]
    pub trend_height_px: f64,
}

impl CarouselConfig {
    /// Creates a config with the stock widget tuning for `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            card_width_ratio: default_card_width_ratio(),
            card_spacing_px: default_card_spacing_px(),
            card_height_px: default_card_height_px(),
            top_margin_px: default_top_margin_px(),
            auto_advance_period_ms: default_auto_advance_period_ms(),
            scroll_animation_ms: default_scroll_animation_ms(),
            loop_strategy: LoopStrategy::default(),
            card_visuals: CardVisualProfile::default(),
            dot_visuals: DotVisualProfile::default(),
            trend_width_px: default_trend_width_px(),
            trend_height_px: default_trend_height_px(),
        }
    }

    #[must_use]
    pub fn with_loop_strategy(mut self, strategy: LoopStrategy) -> Self {
        self.loop_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_auto_advance_period(mut self, period: Duration) -> Self {
        self.auto_advance_period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// A zero duration turns programmatic scrolls into immediate jumps.
    #[must_use]
    pub fn with_scroll_animation(mut self, duration: Duration) -> Self {
        self.scroll_animation_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_card_layout(mut self, width_ratio: f64, spacing_px: f64, height_px: f64) -> Self {
        self.card_width_ratio = width_ratio;
        self.card_spacing_px = spacing_px;
        self.card_height_px = height_px;
        self
    }

    #[must_use]
    pub fn with_card_visuals(mut self, profile: CardVisualProfile) -> Self {
        self.card_visuals = profile;
        self
    }

    #[must_use]
    pub fn with_dot_visuals(mut self, profile: DotVisualProfile) -> Self {
        self.dot_visuals = profile;
        self
    }

    #[must_use]
    pub fn auto_advance_period(self) -> Duration {
        Duration::from_millis(self.auto_advance_period_ms)
    }

    #[must_use]
    pub fn scroll_animation(self) -> Duration {
        Duration::from_millis(self.scroll_animation_ms)
    }

    pub fn geometry(self) -> CarouselResult<CarouselGeometry> {
        CarouselGeometry::new(
            f64::from(self.viewport.width),
            self.card_width_ratio,
            self.card_spacing_px,
        )
    }

    pub fn validate(self) -> CarouselResult<Self> {
        if !self.viewport.is_valid() {
            return Err(CarouselError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.geometry()?;

        if self.auto_advance_period_ms == 0 {
            return Err(CarouselError::InvalidConfig(
                "auto-advance period must be > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("card height", self.card_height_px),
            ("trend width", self.trend_width_px),
            ("trend height", self.trend_height_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CarouselError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.top_margin_px.is_finite() || self.top_margin_px < 0.0 {
            return Err(CarouselError::InvalidConfig(
                "top margin must be finite and >= 0".to_owned(),
            ));
        }

        self.card_visuals.validate()?;
        self.dot_visuals.validate()?;
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> CarouselResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            CarouselError::InvalidConfig(format!("failed to parse carousel config json: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(self) -> CarouselResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            CarouselError::InvalidConfig(format!("failed to serialize carousel config: {e}"))
        })
    }
}

fn default_card_width_ratio() -> f64 {
    0.75
}

fn default_card_spacing_px() -> f64 {
    16.0
}

fn default_card_height_px() -> f64 {
    260.0
}

fn default_top_margin_px() -> f64 {
    24.0
}

fn default_auto_advance_period_ms() -> u64 {
    4_000
}

fn default_scroll_animation_ms() -> u64 {
    300
}

fn default_trend_width_px() -> f64 {
    220.0
}

fn default_trend_height_px() -> f64 {
    40.0
}
