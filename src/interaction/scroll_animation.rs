use std::time::Duration;

/// Ease-out cubic on `t` in `0..=1`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Deterministic programmatic scroll from one offset to another.
///
/// Hosts step it with frame deltas, the same way kinetic motion is stepped,
/// so tests never depend on wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    duration_seconds: f64,
    elapsed_seconds: f64,
}

impl ScrollAnimation {
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration_seconds: duration.as_secs_f64(),
            elapsed_seconds: 0.0,
        }
    }

    #[must_use]
    pub fn target(self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        self.elapsed_seconds >= self.duration_seconds
    }

    #[must_use]
    pub fn current(self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let progress = self.elapsed_seconds / self.duration_seconds;
        self.from + (self.to - self.from) * ease_out_cubic(progress)
    }

    /// Advances by `delta_seconds` and returns the new offset.
    pub fn step(&mut self, delta_seconds: f64) -> f64 {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed_seconds = (self.elapsed_seconds + delta_seconds).min(self.duration_seconds);
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::{ScrollAnimation, ease_out_cubic};
    use std::time::Duration;

    #[test]
    fn animation_reaches_target_exactly() {
        let mut animation = ScrollAnimation::new(0.0, 300.0, Duration::from_millis(300));
        let halfway = animation.step(0.15);
        assert!(halfway > 150.0 && halfway < 300.0);
        assert_eq!(animation.step(1.0), 300.0);
        assert!(animation.is_finished());
    }

    #[test]
    fn zero_duration_is_already_finished() {
        let animation = ScrollAnimation::new(10.0, 20.0, Duration::ZERO);
        assert!(animation.is_finished());
        assert_eq!(animation.current(), 20.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }
}
