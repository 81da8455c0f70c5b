use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No photo provided")]
    MissingFile,

    #[error("Empty filename")]
    EmptyFilename,

    #[error("File type not allowed")]
    DisallowedType(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Audit log error: {0}")]
    AuditLog(#[from] csv::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile
            | AppError::EmptyFilename
            | AppError::DisallowedType(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Storage(_) | AppError::AuditLog(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Client errors carry their own reason; internal details stay in the logs
        let message = match self {
            AppError::DisallowedType(ref extension) => {
                tracing::debug!("Rejected upload with extension '{}'", extension);
                self.to_string()
            }
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::AuditLog(ref e) => {
                tracing::error!("Audit log error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
