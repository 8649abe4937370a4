use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, CarouselResult};

/// How the carousel fakes an endless loop over a finite catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopStrategy {
    /// Slots map 1:1 to stations; crossing an end snaps visibly back.
    Modulo,
    /// A copy of the last station precedes the strip and a copy of the first
    /// follows it; landing on either copy snaps invisibly to the real card.
    #[default]
    PaddedSentinels,
}

/// `(index + len) mod len`, generalised to any signed index.
///
/// `len` must be non-zero.
#[must_use]
pub fn wrap_index(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

/// Result of reconciling a settled scroll position with the index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledSlot {
    /// Slot the strip must rest on.
    pub slot: usize,
    /// Station index shown by `slot`.
    pub real_index: usize,
    /// The raw position fell outside the real range and needs an immediate,
    /// non-animated jump to `slot`.
    pub resnapped: bool,
}

/// Mapping between scroll slots and station indices for one loop strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpace {
    strategy: LoopStrategy,
    len: usize,
}

impl IndexSpace {
    pub fn new(strategy: LoopStrategy, len: usize) -> CarouselResult<Self> {
        if len == 0 {
            return Err(CarouselError::InvalidData(
                "index space needs at least one station".to_owned(),
            ));
        }
        Ok(Self { strategy, len })
    }

    #[must_use]
    pub fn strategy(self) -> LoopStrategy {
        self.strategy
    }

    /// Number of real stations.
    #[must_use]
    pub fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Number of laid-out cards, sentinels included.
    #[must_use]
    pub fn slot_count(self) -> usize {
        match self.strategy {
            LoopStrategy::Modulo => self.len,
            LoopStrategy::PaddedSentinels => self.len + 2,
        }
    }

    #[must_use]
    pub fn initial_slot(self) -> usize {
        self.slot_for_real(0)
    }

    #[must_use]
    pub fn slot_for_real(self, real_index: usize) -> usize {
        let real_index = real_index % self.len;
        match self.strategy {
            LoopStrategy::Modulo => real_index,
            LoopStrategy::PaddedSentinels => real_index + 1,
        }
    }

    #[must_use]
    pub fn real_for_slot(self, slot: usize) -> usize {
        match self.strategy {
            LoopStrategy::Modulo => slot.min(self.len - 1),
            LoopStrategy::PaddedSentinels => {
                if slot == 0 {
                    self.len - 1
                } else if slot > self.len {
                    0
                } else {
                    slot - 1
                }
            }
        }
    }

    #[must_use]
    pub fn is_sentinel(self, slot: usize) -> bool {
        match self.strategy {
            LoopStrategy::Modulo => false,
            LoopStrategy::PaddedSentinels => slot == 0 || slot == self.len + 1,
        }
    }

    /// Slot targeted by one auto-advance step from `slot`.
    ///
    /// With sentinels the step past the last station lands on the trailing
    /// copy; the controller re-snaps once that animation settles.
    #[must_use]
    pub fn next_slot(self, slot: usize) -> usize {
        let next_real = (self.real_for_slot(slot) + 1) % self.len;
        match self.strategy {
            LoopStrategy::Modulo => next_real,
            LoopStrategy::PaddedSentinels if slot >= 1 && slot <= self.len => slot + 1,
            LoopStrategy::PaddedSentinels => self.slot_for_real(next_real),
        }
    }

    /// Reconciles a rounded scroll position with the real station range.
    #[must_use]
    pub fn settle(self, raw_slot: i64) -> SettledSlot {
        let len = self.len as i64;
        match self.strategy {
            LoopStrategy::Modulo => {
                if raw_slot < 0 {
                    self.resnapped(self.len - 1)
                } else if raw_slot >= len {
                    self.resnapped(0)
                } else {
                    self.resting(raw_slot as usize)
                }
            }
            LoopStrategy::PaddedSentinels => {
                if raw_slot <= 0 {
                    self.resnapped(self.len)
                } else if raw_slot > len {
                    self.resnapped(1)
                } else {
                    self.resting(raw_slot as usize)
                }
            }
        }
    }

    fn resting(self, slot: usize) -> SettledSlot {
        SettledSlot {
            slot,
            real_index: self.real_for_slot(slot),
            resnapped: false,
        }
    }

    fn resnapped(self, slot: usize) -> SettledSlot {
        SettledSlot {
            slot,
            real_index: self.real_for_slot(slot),
            resnapped: true,
        }
    }
}
