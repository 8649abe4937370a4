use serde::{Deserialize, Serialize};

use crate::core::{CardVisuals, DotVisuals};
use crate::error::{CarouselError, CarouselResult};
use crate::interaction::{AutoAdvanceScheduler, CarouselMode, LoopStrategy, ScrollCommand};

use super::CarouselController;

pub const CAROUSEL_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of the controller state, for diagnostics and traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselSnapshot {
    pub mode: CarouselMode,
    pub loop_strategy: LoopStrategy,
    pub mounted: bool,
    pub timer_armed: bool,
    pub current_index: usize,
    pub current_slot: usize,
    pub slot_count: usize,
    pub stride: f64,
    pub scroll_offset: f64,
    pub target_offset: f64,
    pub last_scroll_command: Option<ScrollCommand>,
    pub cards: Vec<CardVisuals>,
    pub dots: Vec<DotVisuals>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: CarouselSnapshot,
}

impl<S: AutoAdvanceScheduler> CarouselController<S> {
    #[must_use]
    pub fn snapshot(&self) -> CarouselSnapshot {
        let index_space = self.index_space();
        CarouselSnapshot {
            mode: self.mode(),
            loop_strategy: index_space.strategy(),
            mounted: self.is_mounted(),
            timer_armed: self.is_timer_armed(),
            current_index: self.current_index(),
            current_slot: self.current_slot(),
            slot_count: index_space.slot_count(),
            stride: self.geometry().stride(),
            scroll_offset: self.scroll_offset(),
            target_offset: self.target_offset(),
            last_scroll_command: self.last_scroll_command(),
            cards: (0..index_space.slot_count())
                .map(|slot| self.card_visuals(slot))
                .collect(),
            dots: (0..index_space.len())
                .map(|index| self.dot_visuals(index))
                .collect(),
        }
    }
}

impl CarouselSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> CarouselResult<String> {
        let payload = CarouselSnapshotJsonContractV1 {
            schema_version: CAROUSEL_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            CarouselError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> CarouselResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<CarouselSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: CarouselSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            CarouselError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CAROUSEL_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(CarouselError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
