use std::sync::Arc;

use crate::models::clock::Clock;

use super::error::SigningError;

pub const DEFAULT_WINDOW_MS: i64 = 5 * 60 * 1000;
pub const DEFAULT_SKEW_MS: i64 = 30 * 1000;

/// Acceptance window on the client-claimed timestamp.
///
/// A timestamp `t` passes iff `now - t` lies in `[-skew_ms, window_ms]`.
pub struct ExpiryChecker {
    window_ms: i64,
    skew_ms: i64,
    clock: Arc<dyn Clock>,
}

impl ExpiryChecker {
    pub fn new(window_ms: i64, skew_ms: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            window_ms,
            skew_ms,
            clock,
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window_ms
    }

    pub fn check(&self, timestamp: i64) -> Result<(), SigningError> {
        let age = self.clock.now_ms().saturating_sub(timestamp);
        if age < -self.skew_ms || age > self.window_ms {
            return Err(SigningError::Expired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::clock::ManualClock;
    use quickcheck_macros::quickcheck;

    const NOW: i64 = 1_700_000_000_000;

    fn checker() -> ExpiryChecker {
        ExpiryChecker::new(
            DEFAULT_WINDOW_MS,
            DEFAULT_SKEW_MS,
            Arc::new(ManualClock::new(NOW)),
        )
    }

    #[test]
    fn test_window_edges() {
        let checker = checker();
        assert_eq!(checker.check(NOW), Ok(()));
        assert_eq!(checker.check(NOW - DEFAULT_WINDOW_MS), Ok(()));
        assert_eq!(checker.check(NOW - DEFAULT_WINDOW_MS - 1), Err(SigningError::Expired));
        assert_eq!(checker.check(NOW + DEFAULT_SKEW_MS), Ok(()));
        assert_eq!(checker.check(NOW + DEFAULT_SKEW_MS + 1), Err(SigningError::Expired));
    }

    #[test]
    fn test_ten_minutes_old_is_expired() {
        assert_eq!(
            checker().check(NOW - 10 * 60 * 1000),
            Err(SigningError::Expired)
        );
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let checker = checker();
        assert_eq!(checker.check(i64::MIN), Err(SigningError::Expired));
        assert_eq!(checker.check(i64::MAX), Err(SigningError::Expired));
    }

    #[quickcheck]
    fn prop_older_than_window_always_expires(extra: u32) -> bool {
        let t = NOW - DEFAULT_WINDOW_MS - 1 - extra as i64;
        checker().check(t) == Err(SigningError::Expired)
    }

    #[quickcheck]
    fn prop_within_window_always_passes(age: u32) -> bool {
        let age = age as i64 % (DEFAULT_WINDOW_MS + 1);
        checker().check(NOW - age).is_ok()
    }
}
