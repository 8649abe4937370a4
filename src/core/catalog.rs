use chrono::NaiveTime;
use indexmap::IndexMap;
use indexmap::map::Entry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::station::{StationRecord, StationStatus};
use crate::error::{CarouselError, CarouselResult};

pub const CATALOG_JSON_SCHEMA_V1: u32 = 1;

/// Ordered, immutable set of stations shown by one carousel.
///
/// Names are unique so cards stay addressable by name; insertion order is the
/// display order.
#[derive(Debug, Clone, PartialEq)]
pub struct StationCatalog {
    stations: IndexMap<String, StationRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocumentV1 {
    schema_version: u32,
    stations: Vec<StationRecord>,
}

impl StationCatalog {
    pub fn new(records: Vec<StationRecord>) -> CarouselResult<Self> {
        if records.is_empty() {
            return Err(CarouselError::InvalidData(
                "station catalog must not be empty".to_owned(),
            ));
        }

        let mut stations = IndexMap::with_capacity(records.len());
        for record in records {
            record.validate()?;
            match stations.entry(record.name.clone()) {
                Entry::Occupied(entry) => {
                    return Err(CarouselError::InvalidData(format!(
                        "duplicate station name `{}`",
                        entry.key()
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(record);
                }
            }
        }

        Ok(Self { stations })
    }

    /// The six Taoyuan stations bundled with the widget.
    #[must_use]
    pub fn builtin() -> Self {
        let updated_at = NaiveTime::from_hms_opt(10, 37, 0).unwrap_or(NaiveTime::MIN);
        let record = |name: &str,
                      category: &str,
                      pm25: i64,
                      ozone: i64,
                      aqi: u16,
                      status: StationStatus,
                      trend: [f64; 6]| {
            StationRecord::new(
                name,
                category,
                Decimal::from(pm25),
                Decimal::from(ozone),
                aqi,
                status,
                updated_at,
                trend.to_vec(),
            )
        };

        let records = vec![
            record(
                "中壢",
                "交通測站",
                18,
                42,
                72,
                StationStatus::Moderate,
                [0.4, 0.5, 0.6, 0.55, 0.7, 0.75],
            ),
            record(
                "龍潭",
                "一般測站",
                15,
                38,
                65,
                StationStatus::Moderate,
                [0.3, 0.35, 0.4, 0.45, 0.5, 0.48],
            ),
            record(
                "觀音",
                "背景測站",
                22,
                45,
                78,
                StationStatus::Moderate,
                [0.5, 0.6, 0.65, 0.7, 0.68, 0.72],
            ),
            record(
                "大園",
                "一般測站",
                12,
                35,
                58,
                StationStatus::Good,
                [0.25, 0.3, 0.28, 0.32, 0.35, 0.33],
            ),
            record(
                "桃園",
                "一般測站",
                20,
                48,
                75,
                StationStatus::Moderate,
                [0.45, 0.5, 0.55, 0.6, 0.58, 0.62],
            ),
            record(
                "平鎮",
                "一般測站",
                16,
                40,
                68,
                StationStatus::Moderate,
                [0.35, 0.4, 0.42, 0.45, 0.48, 0.5],
            ),
        ];

        let stations = records
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();
        Self { stations }
    }

    /// Accepts either a bare station array or the versioned document.
    pub fn from_json_str(input: &str) -> CarouselResult<Self> {
        if let Ok(records) = serde_json::from_str::<Vec<StationRecord>>(input) {
            return Self::new(records);
        }
        let document: CatalogDocumentV1 = serde_json::from_str(input).map_err(|e| {
            CarouselError::InvalidData(format!("failed to parse station catalog json: {e}"))
        })?;
        if document.schema_version != CATALOG_JSON_SCHEMA_V1 {
            return Err(CarouselError::InvalidData(format!(
                "unsupported station catalog schema version: {}",
                document.schema_version
            )));
        }
        Self::new(document.stations)
    }

    pub fn to_json_pretty(&self) -> CarouselResult<String> {
        let document = CatalogDocumentV1 {
            schema_version: CATALOG_JSON_SCHEMA_V1,
            stations: self.stations.values().cloned().collect(),
        };
        serde_json::to_string_pretty(&document).map_err(|e| {
            CarouselError::InvalidData(format!("failed to serialize station catalog: {e}"))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StationRecord> {
        self.stations.get_index(index).map(|(_, record)| record)
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<(usize, &StationRecord)> {
        self.stations
            .get_full(name)
            .map(|(index, _, record)| (index, record))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationRecord> {
        self.stations.values()
    }
}
