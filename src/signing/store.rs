use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::models::clock::Clock;
use crate::models::crypto::DerivedKey;

use super::error::SigningError;

/// One outstanding challenge.
///
/// Everything but `consumed` is fixed at issuance. Records are shared as
/// `Arc<Challenge>`, so a verification holding one keeps it alive even if
/// the store evicts the entry mid-flight.
#[derive(Debug)]
pub struct Challenge {
    pub session_id: String,
    pub nonce: String,
    pub timestamp: i64,
    pub derived_key: DerivedKey,
    pub user_agent: String,
    consumed: AtomicBool,
}

impl Challenge {
    pub fn new(
        session_id: String,
        nonce: String,
        timestamp: i64,
        derived_key: DerivedKey,
        user_agent: String,
    ) -> Self {
        Self {
            session_id,
            nonce,
            timestamp,
            derived_key,
            user_agent,
            consumed: AtomicBool::new(false),
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.load(Ordering::Acquire)
    }

    // false -> true exactly once; only the caller that flips it gets `true`
    pub(crate) fn try_consume(&self) -> bool {
        self.consumed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Keyed storage of outstanding challenges, indexed by session id.
///
/// Implementations backed by external storage must bound every call with a
/// timeout and report it as `SigningError::StoreUnavailable`.
pub trait ChallengeStore: Send + Sync {
    /// Inserts the challenge unless its session id is already taken.
    /// Returns `Ok(None)` on a session id collision.
    fn insert(&self, challenge: Challenge) -> Result<Option<Arc<Challenge>>, SigningError>;

    /// Live challenge for `session_id`, `None` when absent or expired.
    fn get(&self, session_id: &str) -> Result<Option<Arc<Challenge>>, SigningError>;

    /// Drops every expired record, consumed or not. Returns how many went.
    fn sweep_expired(&self) -> Result<usize, SigningError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct InMemoryChallengeStore {
    map: DashMap<String, Arc<Challenge>>,
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
}

impl InMemoryChallengeStore {
    pub fn new(ttl_ms: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            map: DashMap::new(),
            ttl_ms,
            clock,
        }
    }

    fn is_expired(&self, challenge: &Challenge, now: i64) -> bool {
        now.saturating_sub(challenge.timestamp) > self.ttl_ms
    }
}

impl ChallengeStore for InMemoryChallengeStore {
    fn insert(&self, challenge: Challenge) -> Result<Option<Arc<Challenge>>, SigningError> {
        match self.map.entry(challenge.session_id.clone()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let challenge = Arc::new(challenge);
                slot.insert(challenge.clone());
                Ok(Some(challenge))
            }
        }
    }

    fn get(&self, session_id: &str) -> Result<Option<Arc<Challenge>>, SigningError> {
        // clone the Arc out so no shard lock is held past this line
        let found = self.map.get(session_id).map(|entry| entry.value().clone());
        let Some(challenge) = found else {
            return Ok(None);
        };

        let now = self.clock.now_ms();
        if self.is_expired(&challenge, now) {
            self.map
                .remove_if(session_id, |_, stored| self.is_expired(stored, now));
            return Ok(None);
        }
        Ok(Some(challenge))
    }

    fn sweep_expired(&self) -> Result<usize, SigningError> {
        let now = self.clock.now_ms();
        let before = self.map.len();
        self.map
            .retain(|_, challenge| !self.is_expired(&**challenge, now));
        Ok(before.saturating_sub(self.map.len()))
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::clock::ManualClock;

    fn challenge(session_id: &str, timestamp: i64) -> Challenge {
        Challenge::new(
            session_id.to_string(),
            "00112233445566778899aabbccddeeff".to_string(),
            timestamp,
            DerivedKey::from("k".repeat(64)),
            String::new(),
        )
    }

    fn store(clock: Arc<ManualClock>) -> InMemoryChallengeStore {
        InMemoryChallengeStore::new(1_000, clock)
    }

    #[test]
    fn test_insert_and_get() {
        let clock = Arc::new(ManualClock::new(10_000));
        let store = store(clock);
        assert!(store.insert(challenge("a", 10_000)).unwrap().is_some());
        let found = store.get("a").unwrap().unwrap();
        assert_eq!(found.session_id, "a");
        assert!(!found.is_consumed());
        assert!(store.get("b").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_session_id_is_refused() {
        let clock = Arc::new(ManualClock::new(10_000));
        let store = store(clock);
        store.insert(challenge("a", 10_000)).unwrap();
        assert!(store.insert(challenge("a", 10_000)).unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_lazy_eviction_on_lookup() {
        let clock = Arc::new(ManualClock::new(10_000));
        let store = store(clock.clone());
        store.insert(challenge("a", 10_000)).unwrap();
        clock.advance(1_001);
        assert!(store.get("a").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_sweep_removes_consumed_and_unconsumed() {
        let clock = Arc::new(ManualClock::new(10_000));
        let store = store(clock.clone());
        store.insert(challenge("old-open", 9_000)).unwrap();
        let consumed = store.insert(challenge("old-used", 9_000)).unwrap().unwrap();
        assert!(consumed.try_consume());
        store.insert(challenge("fresh", 10_000)).unwrap();

        clock.advance(500);
        assert_eq!(store.sweep_expired().unwrap(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.get("fresh").unwrap().is_some());
    }

    #[test]
    fn test_held_reference_survives_eviction() {
        let clock = Arc::new(ManualClock::new(10_000));
        let store = store(clock.clone());
        store.insert(challenge("a", 10_000)).unwrap();
        let held = store.get("a").unwrap().unwrap();

        clock.advance(5_000);
        store.sweep_expired().unwrap();
        assert!(store.get("a").unwrap().is_none());
        assert_eq!(held.session_id, "a");
        assert!(held.try_consume());
    }

    #[test]
    fn test_consume_flips_once() {
        let c = challenge("a", 0);
        assert!(c.try_consume());
        assert!(!c.try_consume());
        assert!(c.is_consumed());
    }
}
