use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use super::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Base64 data exceeds the maximum allowed length")]
    Base64DataTooLarge,

    #[error("Invalid base64 data: {0}")]
    InvalidBase64(String),

    #[error("Decoded file exceeds the maximum allowed size")]
    FileSizeTooLarge,

    #[error("Filename must not be empty")]
    EmptyFilename,

    #[error("Filename exceeds 255 characters")]
    FilenameTooLong,

    #[error("Filename contains forbidden character '{0}'")]
    ForbiddenCharacter(char),

    #[error("Filename must not start or end with a dot or space")]
    InvalidFilenameEdges,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request validation failed")]
    Validation {
        #[from]
        source: ValidationError,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad Request".to_string(),
                Some(msg),
            ),
            AppError::Validation { source } => (
                StatusCode::BAD_REQUEST,
                "Validation Error".to_string(),
                Some(source.to_string()),
            ),
        };

        let mut error_response = ErrorResponse::new(error_message);
        if let Some(details) = details {
            error_response = error_response.with_details(details);
        }

        (status, Json(error_response)).into_response()
    }
}
