use std::sync::Arc;

use crate::{
    app_context::AppContext,
    signing::{ActionSource, Challenge},
};

use super::{
    dtos::{ChallengeData, SignatureQuery},
    error::AuthError,
};

pub(crate) async fn issue_challenge(
    ctx: Arc<AppContext>,
    user_agent: Option<&str>,
) -> Result<ChallengeData, AuthError> {
    let issued = ctx.signing.issuer.issue(user_agent).map_err(|e| {
        log::error!("Failed to issue challenge: {}", e);
        AuthError::from(e)
    })?;
    Ok(ChallengeData::new(issued, ctx.signing.window_ms()))
}

// Gate for every signed write endpoint. Consumes the challenge on success.
pub(crate) fn verify_signed_action(
    ctx: &AppContext,
    query: SignatureQuery,
    user_agent: Option<&str>,
    action: &impl ActionSource,
) -> Result<Arc<Challenge>, AuthError> {
    let request = query.into_signed_request(user_agent).map_err(|e| {
        log::warn!("Rejected request without signature parameters");
        AuthError::from(e)
    })?;
    let challenge = ctx.signing.verifier.verify_action(&request, action)?;
    Ok(challenge)
}
