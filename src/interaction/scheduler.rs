use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identity of one armed repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Source of repeating auto-advance ticks.
///
/// Implementations deliver fires back to the controller as
/// `CarouselEvent::TimerFired(handle)`. The controller cancels before it arms,
/// and ignores fires from handles it no longer owns.
pub trait AutoAdvanceScheduler {
    fn arm(&mut self, period: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ManualTimer {
    handle: TimerHandle,
    period: Duration,
    remaining: Duration,
}

/// Deterministic scheduler driven by an explicit clock.
///
/// Nothing fires on its own: `advance` moves the fake clock and reports which
/// handles fired, in order, so tests and headless hosts can feed them back.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    live: Vec<ManualTimer>,
    armed_total: usize,
    cancelled_total: usize,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn live_handles(&self) -> Vec<TimerHandle> {
        self.live.iter().map(|timer| timer.handle).collect()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn armed_total(&self) -> usize {
        self.armed_total
    }

    #[must_use]
    pub fn cancelled_total(&self) -> usize {
        self.cancelled_total
    }

    #[must_use]
    pub fn period_of(&self, handle: TimerHandle) -> Option<Duration> {
        self.live
            .iter()
            .find(|timer| timer.handle == handle)
            .map(|timer| timer.period)
    }

    /// Moves the fake clock forward and returns every fire that elapsed.
    ///
    /// Zero-period timers never fire.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TimerHandle> {
        let mut fired = Vec::new();
        for timer in &mut self.live {
            if timer.period.is_zero() {
                continue;
            }
            let mut budget = elapsed;
            while budget >= timer.remaining {
                budget -= timer.remaining;
                timer.remaining = timer.period;
                fired.push(timer.handle);
            }
            timer.remaining -= budget;
        }
        fired
    }
}

impl AutoAdvanceScheduler for ManualScheduler {
    fn arm(&mut self, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.live.push(ManualTimer {
            handle,
            period,
            remaining: period,
        });
        self.armed_total += 1;
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let before = self.live.len();
        self.live.retain(|timer| timer.handle != handle);
        if self.live.len() != before {
            self.cancelled_total += 1;
        }
    }
}
