//! Countdown: the scoped repeating task behind time mode.
//!
//! The countdown only exists while a game is being played in time mode. The
//! session arms it when entering that condition and cancels it on every way
//! out, so a stale interval can never fire into a later game.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    period: Duration,
    elapsed: Duration,
    armed: bool,
}

impl Countdown {
    /// Create a disarmed countdown firing once per `period`
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            armed: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start a fresh interval (any partial progress is dropped).
    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed = Duration::ZERO;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed = Duration::ZERO;
    }

    /// Accumulate wall-clock time. Ignored while disarmed.
    pub fn advance(&mut self, dt: Duration) {
        if !self.armed {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Consume one due period, returning whether a tick should run now.
    ///
    /// Callers loop on this so ticks are delivered strictly one at a time.
    pub fn fire(&mut self) -> bool {
        if !self.armed || self.period.is_zero() || self.elapsed < self.period {
            return false;
        }
        self.elapsed -= self.period;
        true
    }

    /// Time until the next tick is due (`None` while disarmed)
    pub fn until_next(&self) -> Option<Duration> {
        if !self.armed {
            return None;
        }
        Some(self.period.saturating_sub(self.elapsed))
    }
}
