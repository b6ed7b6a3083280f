use std::sync::Arc;

use crate::models::clock::Clock;
use crate::models::crypto::{derive_key, random_hex, DerivedKey, MasterSecret};

use super::error::SigningError;
use super::store::{Challenge, ChallengeStore};

// 128 bits of entropy each
const NONCE_BYTES: usize = 16;
const SESSION_ID_BYTES: usize = 16;

// A 128-bit session id collision means the RNG is broken, give up quickly
const MAX_INSERT_ATTEMPTS: usize = 3;

/// Tuple handed to the client. The derived key is the only secret in it.
#[derive(Debug, Clone)]
pub struct IssuedChallenge {
    pub timestamp: i64,
    pub nonce: String,
    pub session_id: String,
    pub derived_key: DerivedKey,
}

pub struct ChallengeIssuer {
    master: Arc<MasterSecret>,
    store: Arc<dyn ChallengeStore>,
    clock: Arc<dyn Clock>,
}

impl ChallengeIssuer {
    pub fn new(
        master: Arc<MasterSecret>,
        store: Arc<dyn ChallengeStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            master,
            store,
            clock,
        }
    }

    pub fn issue(&self, user_agent: Option<&str>) -> Result<IssuedChallenge, SigningError> {
        let user_agent = user_agent.unwrap_or_default();

        for _ in 0..MAX_INSERT_ATTEMPTS {
            let session_id = random_hex(SESSION_ID_BYTES);
            let nonce = random_hex(NONCE_BYTES);
            let timestamp = self.clock.now_ms();
            let derived_key =
                derive_key(&self.master, &session_id, &nonce, timestamp, user_agent);

            let challenge = Challenge::new(
                session_id,
                nonce,
                timestamp,
                derived_key,
                user_agent.to_string(),
            );
            if let Some(stored) = self.store.insert(challenge)? {
                log::debug!("Issued challenge for session {}", stored.session_id);
                return Ok(IssuedChallenge {
                    timestamp: stored.timestamp,
                    nonce: stored.nonce.clone(),
                    session_id: stored.session_id.clone(),
                    derived_key: stored.derived_key.clone(),
                });
            }
            log::warn!("Session id collision while issuing challenge, retrying");
        }

        Err(SigningError::StoreUnavailable(
            "could not allocate a unique session id".to_string(),
        ))
    }
}
