use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::signing::{IssuedChallenge, SignedRequest, SigningError};

// Signature material of a signed action, taken from the query string.
// Every field is optional so that absence maps to a 400 instead of an
// extractor failure.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct SignatureQuery {
    /// base64url(SHA-512(derivedKey + source + complexTimestamp + nonce))
    pub s: Option<String>,
    /// Client-claimed timestamp in milliseconds
    pub t: Option<String>,
    /// Nonce of the challenge
    pub n: Option<String>,
    /// Session id of the challenge
    pub sid: Option<String>,
}

fn present(value: Option<String>) -> Result<String, SigningError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SigningError::MissingSignature),
    }
}

impl SignatureQuery {
    pub fn into_signed_request(
        self,
        user_agent: Option<&str>,
    ) -> Result<SignedRequest, SigningError> {
        let signature = present(self.s)?;
        let timestamp = present(self.t)?
            .parse::<i64>()
            .map_err(|_| SigningError::MissingSignature)?;
        let nonce = present(self.n)?;
        let session_id = present(self.sid)?;
        Ok(SignedRequest {
            signature,
            timestamp,
            nonce,
            session_id,
            user_agent: user_agent.unwrap_or_default().to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChallengeData {
    pub timestamp: i64,
    pub nonce: String,
    pub session_id: String,
    pub derived_key: String,
    pub window_ms: i64,
}

impl ChallengeData {
    pub fn new(issued: IssuedChallenge, window_ms: i64) -> Self {
        Self {
            timestamp: issued.timestamp,
            nonce: issued.nonce,
            session_id: issued.session_id,
            derived_key: issued.derived_key.into_string(),
            window_ms,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChallengeResponse {
    pub success: bool,
    pub data: ChallengeData,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(s: &str, t: &str, n: &str, sid: &str) -> SignatureQuery {
        SignatureQuery {
            s: Some(s.to_string()),
            t: Some(t.to_string()),
            n: Some(n.to_string()),
            sid: Some(sid.to_string()),
        }
    }

    #[test]
    fn test_complete_query() {
        let request = query("sig", "1700000000000", "abcd", "sid")
            .into_signed_request(Some("agent"))
            .unwrap();
        assert_eq!(request.timestamp, 1_700_000_000_000);
        assert_eq!(request.session_id, "sid");
        assert_eq!(request.user_agent, "agent");
    }

    #[test]
    fn test_absent_or_malformed_fields() {
        assert_eq!(
            SignatureQuery::default().into_signed_request(None),
            Err(SigningError::MissingSignature)
        );
        assert_eq!(
            query("", "1", "n", "sid").into_signed_request(None),
            Err(SigningError::MissingSignature)
        );
        assert_eq!(
            query("s", "yesterday", "n", "sid").into_signed_request(None),
            Err(SigningError::MissingSignature)
        );
        let mut no_sid = query("s", "1", "n", "sid");
        no_sid.sid = None;
        assert_eq!(
            no_sid.into_signed_request(None),
            Err(SigningError::MissingSignature)
        );
    }
}
