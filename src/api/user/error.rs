use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt::Display;

use crate::accounts::RegistrationError;
use crate::api::auth::{dtos::ErrorBody, error::AuthError};

#[derive(Debug)]
pub(crate) enum UserError {
    Auth(AuthError),
    Registration(RegistrationError),
}

impl From<AuthError> for UserError {
    fn from(e: AuthError) -> Self {
        UserError::Auth(e)
    }
}

impl From<RegistrationError> for UserError {
    fn from(e: RegistrationError) -> Self {
        UserError::Registration(e)
    }
}

impl Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserError::Auth(e) => write!(f, "{}", e),
            UserError::Registration(e) => write!(f, "{}", e),
        }
    }
}

impl ResponseError for UserError {
    fn error_response(&self) -> HttpResponse {
        match self {
            UserError::Auth(e) => e.error_response(),
            UserError::Registration(e) => {
                HttpResponse::build(self.status_code()).json(ErrorBody::new(e.to_string()))
            }
        }
    }
    fn status_code(&self) -> StatusCode {
        match self {
            UserError::Auth(e) => e.status_code(),
            UserError::Registration(_) => StatusCode::BAD_REQUEST,
        }
    }
}
