//! Injectable time source for status derivation.
//!
//! # Responsibility
//! - Provide the "current time" read once when a todo is constructed.
//! - Let callers substitute a fixed instant instead of patching global time.
//!
//! # Invariants
//! - All instants are Unix epoch milliseconds (UTC).

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current wall-clock time.
pub trait Clock {
    /// Returns the current time as Unix epoch milliseconds.
    fn now_epoch_ms(&self) -> i64;
}

/// Real wall clock backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        // A host clock set before 1970 reads as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
            })
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, SystemClock};

    #[test]
    fn fixed_clock_returns_frozen_instant() {
        let clock = FixedClock(1_606_780_800_000);
        assert_eq!(clock.now_epoch_ms(), 1_606_780_800_000);
        assert_eq!(clock.now_epoch_ms(), 1_606_780_800_000);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_epoch_ms() > 1_577_836_800_000);
    }
}
