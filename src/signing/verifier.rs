use std::sync::Arc;

use crate::models::crypto::{compute_signature, derive_key, verify_eq, MasterSecret};

use super::error::SigningError;
use super::expiry::ExpiryChecker;
use super::replay::ReplayGuard;
use super::source::ActionSource;
use super::store::{Challenge, ChallengeStore};

/// Signature material carried in the query string of a signed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub signature: String,
    pub timestamp: i64,
    pub nonce: String,
    pub session_id: String,
    // User-Agent of the submitting client, empty when absent
    pub user_agent: String,
}

pub struct SignatureVerifier {
    master: Arc<MasterSecret>,
    store: Arc<dyn ChallengeStore>,
    expiry: ExpiryChecker,
    replay: ReplayGuard,
}

impl SignatureVerifier {
    pub fn new(
        master: Arc<MasterSecret>,
        store: Arc<dyn ChallengeStore>,
        expiry: ExpiryChecker,
    ) -> Self {
        Self {
            master,
            store,
            expiry,
            replay: ReplayGuard,
        }
    }

    pub fn expiry(&self) -> &ExpiryChecker {
        &self.expiry
    }

    pub fn verify_action(
        &self,
        request: &SignedRequest,
        action: &impl ActionSource,
    ) -> Result<Arc<Challenge>, SigningError> {
        self.verify(request, &action.signing_source())
    }

    /// Runs every gate and, when all pass, consumes the challenge.
    ///
    /// Order: session lookup, consumed pre-check, expiry, nonce binding,
    /// client binding, signature, atomic consume. The key always comes from
    /// the record stored under the request's own `sid`.
    pub fn verify(
        &self,
        request: &SignedRequest,
        source: &str,
    ) -> Result<Arc<Challenge>, SigningError> {
        let result = self.run_gates(request, source);
        match &result {
            Ok(_) => log::info!("Accepted signed request for session {}", request.session_id),
            Err(e) if e.is_protocol_rejection() => log::warn!(
                "Rejected signed request for session {}: {}",
                request.session_id,
                e
            ),
            Err(e) => log::error!(
                "Could not verify signed request for session {}: {}",
                request.session_id,
                e
            ),
        }
        result
    }

    fn run_gates(
        &self,
        request: &SignedRequest,
        source: &str,
    ) -> Result<Arc<Challenge>, SigningError> {
        let challenge = self
            .store
            .get(&request.session_id)?
            .ok_or(SigningError::UnknownSession)?;

        self.replay.ensure_unused(&challenge)?;
        // the claimed time and the issuance time must both be in the window
        self.expiry.check(request.timestamp)?;
        self.expiry.check(challenge.timestamp)?;
        self.replay.ensure_bound(&challenge, &request.nonce)?;
        self.ensure_same_client(&challenge, &request.user_agent)?;

        let expected = compute_signature(
            challenge.derived_key.as_str(),
            source,
            request.timestamp,
            &request.nonce,
        )
        .ok_or(SigningError::InvalidSignature)?;
        if !verify_eq(&expected, &request.signature) {
            return Err(SigningError::InvalidSignature);
        }

        self.replay.consume(&challenge, &request.nonce)?;
        Ok(challenge)
    }

    // Re-derive from the issued fields and the submitting client's agent. A
    // key lifted into another client context derives differently.
    fn ensure_same_client(
        &self,
        challenge: &Challenge,
        user_agent: &str,
    ) -> Result<(), SigningError> {
        let rederived = derive_key(
            &self.master,
            &challenge.session_id,
            &challenge.nonce,
            challenge.timestamp,
            user_agent,
        );
        if !verify_eq(rederived.as_str(), challenge.derived_key.as_str()) {
            log::debug!(
                "Client mismatch for session {}: issued to {:?}, presented by {:?}",
                challenge.session_id,
                challenge.user_agent,
                user_agent
            );
            return Err(SigningError::InvalidSignature);
        }
        Ok(())
    }
}
