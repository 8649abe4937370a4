use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, CarouselResult};

/// Cosmetic air-quality badge shown on a station card.
///
/// The badge is authored alongside the metrics; nothing derives it from
/// `aqi`, so keeping both consistent is up to whoever writes the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StationStatus {
    Good,
    Moderate,
    Unhealthy,
}

impl StationStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Moderate => "MODERATE",
            Self::Unhealthy => "UNHEALTHY",
        }
    }
}

/// One monitoring station as displayed by a carousel card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub category: String,
    pub pm25: Decimal,
    pub ozone: Decimal,
    pub aqi: u16,
    pub status: StationStatus,
    pub updated_at: NaiveTime,
    /// Normalized samples, nominally in `0..=1`, oldest first.
    pub trend: Vec<f64>,
}

impl StationRecord {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        pm25: Decimal,
        ozone: Decimal,
        aqi: u16,
        status: StationStatus,
        updated_at: NaiveTime,
        trend: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            pm25,
            ozone,
            aqi,
            status,
            updated_at,
            trend,
        }
    }

    /// Header label, e.g. `Updated 10:37`.
    #[must_use]
    pub fn updated_label(&self) -> String {
        format!("Updated {}", self.updated_at.format("%H:%M"))
    }

    #[must_use]
    pub fn pm25_label(&self) -> String {
        self.pm25.normalize().to_string()
    }

    #[must_use]
    pub fn ozone_label(&self) -> String {
        self.ozone.normalize().to_string()
    }

    #[must_use]
    pub fn aqi_label(&self) -> String {
        self.aqi.to_string()
    }

    /// Rejects records that would break the card renderer.
    ///
    /// A short or non-finite trend is an authoring bug in the catalog, so it
    /// fails here instead of drawing a degenerate sketch later.
    pub fn validate(&self) -> CarouselResult<()> {
        if self.name.trim().is_empty() {
            return Err(CarouselError::InvalidData(
                "station name must not be empty".to_owned(),
            ));
        }
        if self.trend.len() < 2 {
            return Err(CarouselError::TrendTooShort {
                len: self.trend.len(),
            });
        }
        if let Some(position) = self.trend.iter().position(|value| !value.is_finite()) {
            return Err(CarouselError::InvalidData(format!(
                "station `{}` has a non-finite trend sample at {position}",
                self.name
            )));
        }
        Ok(())
    }
}
