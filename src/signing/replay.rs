use crate::models::crypto::verify_eq;

use super::error::SigningError;
use super::store::Challenge;

/// Enforces single use of a `(sessionId, nonce)` pair.
///
/// State lives on the challenge record itself, so racing requests on the
/// same session contend on one atomic flag and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplayGuard;

impl ReplayGuard {
    // Cheap early rejection, lets a reused session fail as a replay even when
    // the new payload would not verify
    pub fn ensure_unused(&self, challenge: &Challenge) -> Result<(), SigningError> {
        if challenge.is_consumed() {
            return Err(SigningError::AlreadyConsumed);
        }
        Ok(())
    }

    // Nonce presented with the request must be the one issued for the session
    pub fn ensure_bound(&self, challenge: &Challenge, nonce: &str) -> Result<(), SigningError> {
        if !verify_eq(&challenge.nonce, nonce) {
            return Err(SigningError::InvalidSignature);
        }
        Ok(())
    }

    pub fn consume(&self, challenge: &Challenge, nonce: &str) -> Result<(), SigningError> {
        self.ensure_bound(challenge, nonce)?;
        if !challenge.try_consume() {
            return Err(SigningError::AlreadyConsumed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crypto::DerivedKey;
    use std::sync::{Arc, Barrier};
    use std::thread;

    const NONCE: &str = "0123456789abcdef0123456789abcdef";

    fn challenge() -> Challenge {
        Challenge::new(
            "session".to_string(),
            NONCE.to_string(),
            0,
            DerivedKey::from("key".to_string()),
            String::new(),
        )
    }

    #[test]
    fn test_consume_once_then_reject() {
        let guard = ReplayGuard;
        let c = challenge();
        assert_eq!(guard.ensure_unused(&c), Ok(()));
        assert_eq!(guard.consume(&c, NONCE), Ok(()));
        assert_eq!(guard.ensure_unused(&c), Err(SigningError::AlreadyConsumed));
        assert_eq!(guard.consume(&c, NONCE), Err(SigningError::AlreadyConsumed));
    }

    #[test]
    fn test_foreign_nonce_does_not_consume() {
        let guard = ReplayGuard;
        let c = challenge();
        assert_eq!(
            guard.consume(&c, "ffffffffffffffffffffffffffffffff"),
            Err(SigningError::InvalidSignature)
        );
        assert!(!c.is_consumed());
    }

    #[test]
    fn test_concurrent_consume_has_one_winner() {
        let threads = 16;
        let c = Arc::new(challenge());
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let c = c.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    ReplayGuard.consume(&c, NONCE).is_ok()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
