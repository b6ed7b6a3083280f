//! Challenge issuance and signed-request verification.

use std::sync::Arc;
use std::time::Duration;

use crate::config_loader::SigningConfig;
use crate::models::clock::Clock;
use crate::models::crypto::MasterSecret;

pub mod error;
pub mod expiry;
pub mod issuer;
pub mod replay;
pub mod source;
pub mod store;
pub mod verifier;

pub use error::SigningError;
pub use issuer::{ChallengeIssuer, IssuedChallenge};
pub use source::ActionSource;
pub use store::{Challenge, ChallengeStore, InMemoryChallengeStore};
pub use verifier::{SignatureVerifier, SignedRequest};

use expiry::ExpiryChecker;

// Records outlive the acceptance window by this much before eviction
const EVICTION_GRACE_MS: i64 = 60 * 1000;

/// Everything the HTTP layer needs: one issuer and one verifier sharing a
/// store and a clock.
pub struct SigningService {
    pub issuer: ChallengeIssuer,
    pub verifier: SignatureVerifier,
    store: Arc<dyn ChallengeStore>,
    sweep_interval: Duration,
}

impl SigningService {
    pub fn new(config: &SigningConfig, master: MasterSecret, clock: Arc<dyn Clock>) -> Self {
        let ttl_ms = config.window_ms + config.skew_ms + EVICTION_GRACE_MS;
        let store: Arc<dyn ChallengeStore> =
            Arc::new(InMemoryChallengeStore::new(ttl_ms, clock.clone()));
        Self::with_store(config, master, store, clock)
    }

    pub fn with_store(
        config: &SigningConfig,
        master: MasterSecret,
        store: Arc<dyn ChallengeStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let master = Arc::new(master);
        let issuer = ChallengeIssuer::new(master.clone(), store.clone(), clock.clone());
        let expiry = ExpiryChecker::new(config.window_ms, config.skew_ms, clock);
        let verifier = SignatureVerifier::new(master, store.clone(), expiry);
        Self {
            issuer,
            verifier,
            store,
            sweep_interval: Duration::from_secs(config.sweep_interval_secs.max(1)),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.verifier.expiry().window_ms()
    }

    pub fn store(&self) -> &Arc<dyn ChallengeStore> {
        &self.store
    }

    pub fn sweep(&self) -> usize {
        match self.store.sweep_expired() {
            Ok(0) => 0,
            Ok(evicted) => {
                log::debug!("Evicted {} expired challenges", evicted);
                evicted
            }
            Err(e) => {
                log::error!("Challenge sweep failed: {}", e);
                0
            }
        }
    }

    /// Periodic eviction on the actix runtime. Must be called from within it.
    pub fn spawn_sweeper(self: &Arc<Self>) {
        let service = self.clone();
        actix_web::rt::spawn(async move {
            let mut interval = actix_web::rt::time::interval(service.sweep_interval);
            loop {
                interval.tick().await;
                service.sweep();
            }
        });
    }
}
