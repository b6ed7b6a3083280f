use std::fmt::Display;

// Internal reasons a signed request is refused. The HTTP layer folds every
// protocol rejection into a single 403 so this detail only reaches the logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    MissingSignature,
    UnknownSession,
    InvalidSignature,
    Expired,
    AlreadyConsumed,
    StoreUnavailable(String),
}

impl SigningError {
    // Rejections the client caused, as opposed to infrastructure faults
    pub fn is_protocol_rejection(&self) -> bool {
        matches!(
            self,
            SigningError::UnknownSession
                | SigningError::InvalidSignature
                | SigningError::Expired
                | SigningError::AlreadyConsumed
        )
    }
}

impl Display for SigningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigningError::MissingSignature => write!(f, "Signature parameters missing"),
            SigningError::UnknownSession => write!(f, "Unknown or evicted session"),
            SigningError::InvalidSignature => write!(f, "Signature verification failed"),
            SigningError::Expired => write!(f, "Timestamp outside acceptance window"),
            SigningError::AlreadyConsumed => write!(f, "Challenge already consumed"),
            SigningError::StoreUnavailable(msg) => write!(f, "Challenge store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for SigningError {}
