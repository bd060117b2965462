//! Elapsed-time periodic timer on a wrapping millisecond clock.
//!
//! Expiry is decided by `now - last >= period` in wrapping `u32`
//! arithmetic, so the timer keeps working across the ~49.7 day rollover
//! of a millisecond counter and does not depend on how often it is
//! polled.

/// A free-running period checked once per loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTimer {
    period_ms: u32,
    last_ms: u32,
}

impl PeriodicTimer {
    /// Timer whose first expiry is one period after time zero.
    pub const fn new(period_ms: u32) -> Self {
        Self::starting_at(period_ms, 0)
    }

    /// Timer whose first expiry is one period after `now_ms`.
    pub const fn starting_at(period_ms: u32, now_ms: u32) -> Self {
        Self { period_ms, last_ms: now_ms }
    }

    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Returns `true` at most once per call when a period has elapsed.
    ///
    /// The deadline advances by whole periods to stay phase-locked to the
    /// clock.  After a stall longer than one period it resynchronises to
    /// `now_ms` instead of firing a burst of catch-up expiries.
    pub fn expired(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) < self.period_ms {
            return false;
        }
        self.last_ms = self.last_ms.wrapping_add(self.period_ms);
        if now_ms.wrapping_sub(self.last_ms) >= self.period_ms {
            self.last_ms = now_ms;
        }
        true
    }
}
