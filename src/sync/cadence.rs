//! Fixed-rate cadence and cancellation
//!
//! The poll loop fires on a fixed schedule that ignores how long earlier
//! requests take. `Cadence` turns elapsed time into a number of due ticks, so
//! the schedule can be driven by a browser timer or stepped by hand.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::ConfigError;

/// Accumulator that yields ticks at a fixed period
#[derive(Debug, Clone, PartialEq)]
pub struct Cadence {
    period_ms: f64,
    accumulator: f64,
}

impl Cadence {
    pub fn from_hz(hz: f32) -> Result<Self, ConfigError> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ConfigError::Cadence(hz));
        }
        Ok(Self {
            period_ms: 1000.0 / hz as f64,
            accumulator: 0.0,
        })
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Advance the clock by `dt_ms` and return how many ticks came due (0 or 1).
    ///
    /// The first tick is due one full period after start. One wake issues at
    /// most one tick; backlog beyond one pending period is dropped, so a
    /// throttled timer polls once per wake instead of in bursts.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        self.accumulator += dt_ms;
        if self.accumulator < self.period_ms {
            return 0;
        }
        self.accumulator -= self.period_ms;

        if self.accumulator > self.period_ms {
            let kept = self.period_ms + self.accumulator % self.period_ms;
            log::debug!("Cadence dropped {:.0}ms of backlog", self.accumulator - kept);
            self.accumulator = kept;
        }
        1
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Shared stop flag for a periodic task
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_after_one_period() {
        let mut c = Cadence::from_hz(20.0).unwrap();
        assert_eq!(c.period_ms(), 50.0);
        assert_eq!(c.advance(49.0), 0);
        assert_eq!(c.advance(1.0), 1);
        assert_eq!(c.advance(10.0), 0);
    }

    #[test]
    fn test_tick_count_over_duration() {
        // 10 s at 20 Hz stepped at ~60 fps
        let mut c = Cadence::from_hz(20.0).unwrap();
        let total: u32 = (0..600).map(|_| c.advance(1000.0 / 60.0)).sum();
        assert!((199..=201).contains(&total), "got {total}");

        // 3 s at 50 Hz with uneven frame times
        let mut c = Cadence::from_hz(50.0).unwrap();
        let steps = [7.0, 33.0, 16.0, 4.0, 40.0];
        let mut elapsed = 0.0;
        let mut total = 0;
        while elapsed < 3000.0 {
            for dt in steps {
                total += c.advance(dt);
                elapsed += dt;
            }
        }
        let expected = (elapsed / 1000.0 * 50.0).round() as u32;
        assert!(total + 1 >= expected && total <= expected + 1, "got {total}, expected {expected}");
    }

    #[test]
    fn test_backlog_fires_once_per_wake() {
        let mut c = Cadence::from_hz(100.0).unwrap();
        assert_eq!(c.advance(10_000.0), 1);
        // One pending period survives, the rest is gone
        assert_eq!(c.advance(5.0), 1);
        assert_eq!(c.advance(4.0), 0);
    }

    #[test]
    fn test_throttled_timer_polls_once_per_wake() {
        // Background tab: a 20 Hz timer woken about once a second
        let mut c = Cadence::from_hz(20.0).unwrap();
        let fired: Vec<u32> = (0..5).map(|_| c.advance(1000.0)).collect();
        assert_eq!(fired, vec![1; 5]);
    }

    #[test]
    fn test_rejects_bad_frequency() {
        assert!(Cadence::from_hz(0.0).is_err());
        assert!(Cadence::from_hz(f32::NAN).is_err());
        let mut c = Cadence::from_hz(1.0).unwrap();
        assert_eq!(c.advance(-5.0), 0);
    }

    #[test]
    fn test_cancel_token_shared() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }
}
