use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt::Display;

use super::dtos::ErrorBody;
use crate::signing::SigningError;

// Same body for every protocol rejection, whatever the internal reason
pub(crate) const REJECTED_MESSAGE: &str = "Request rejected";

#[derive(Debug)]
pub(crate) enum AuthError {
    MissingSignature,
    Rejected,
    ServerError,
}

impl From<SigningError> for AuthError {
    fn from(e: SigningError) -> Self {
        match e {
            SigningError::MissingSignature => AuthError::MissingSignature,
            SigningError::StoreUnavailable(_) => AuthError::ServerError,
            SigningError::UnknownSession
            | SigningError::InvalidSignature
            | SigningError::Expired
            | SigningError::AlreadyConsumed => AuthError::Rejected,
        }
    }
}

impl Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingSignature => write!(f, "Missing request signature"),
            AuthError::Rejected => write!(f, "{}", REJECTED_MESSAGE),
            AuthError::ServerError => write!(f, "Server error"),
        }
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingSignature => StatusCode::BAD_REQUEST,
            AuthError::Rejected => StatusCode::FORBIDDEN,
            AuthError::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_indistinguishable() {
        let rejections = [
            SigningError::UnknownSession,
            SigningError::InvalidSignature,
            SigningError::Expired,
            SigningError::AlreadyConsumed,
        ];
        for e in rejections {
            assert!(e.is_protocol_rejection());
            let err = AuthError::from(e);
            assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
            assert_eq!(err.to_string(), REJECTED_MESSAGE);
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AuthError::from(SigningError::MissingSignature).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::from(SigningError::StoreUnavailable("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
