use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt::Display;

use crate::api::auth::{dtos::ErrorBody, error::AuthError};

#[derive(Debug)]
pub(crate) enum HomeworkError {
    Auth(AuthError),
    MissingFields,
    InvalidStageId(String),
}

impl From<AuthError> for HomeworkError {
    fn from(e: AuthError) -> Self {
        HomeworkError::Auth(e)
    }
}

impl Display for HomeworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeworkError::Auth(e) => write!(f, "{}", e),
            HomeworkError::MissingFields => write!(f, "Missing required parameters"),
            HomeworkError::InvalidStageId(id) => write!(f, "Invalid stage id '{}'", id),
        }
    }
}

impl ResponseError for HomeworkError {
    fn error_response(&self) -> HttpResponse {
        match self {
            HomeworkError::Auth(e) => e.error_response(),
            _ => HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string())),
        }
    }
    fn status_code(&self) -> StatusCode {
        match self {
            HomeworkError::Auth(e) => e.status_code(),
            HomeworkError::MissingFields => StatusCode::BAD_REQUEST,
            HomeworkError::InvalidStageId(_) => StatusCode::BAD_REQUEST,
        }
    }
}
