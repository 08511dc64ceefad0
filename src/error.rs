use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application error taxonomy. Every variant carries (or maps to) a stable
/// machine-readable code; the web client dispatches on `error`, humans read
/// `message`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{message}")]
    Validation { code: &'static str, message: String },
    #[error("Not found")]
    NotFound { code: &'static str },
    #[error("{message}")]
    Conflict { code: &'static str, message: String },
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Setup token rejected")]
    Unauthorized,
    #[error("Server misconfiguration: {0}")]
    Config(&'static str),
    #[error("Conditional update matched no document")]
    UpdateFailed,
    #[error("Internal server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { code, message: message.into() }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict { code, message: message.into() }
    }

    /// The stable code sent on the wire for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Database(_) | Self::Internal => "INTERNAL",
            Self::Validation { code, .. } | Self::NotFound { code } | Self::Conflict { code, .. } => code,
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Config(_) => "CONFIG_ERROR",
            Self::UpdateFailed => "UPDATE_FAILED",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Validation { message, .. } => {
                tracing::debug!(message = %message, "Bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotFound { .. } => {
                tracing::debug!("Resource not found");
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            AppError::Conflict { message, .. } => {
                tracing::debug!(message = %message, "Conflict");
                (StatusCode::CONFLICT, message)
            }
            AppError::InvalidCredentials => {
                tracing::debug!("Authentication failed");
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            AppError::Unauthorized => {
                tracing::warn!("Setup token rejected");
                (StatusCode::FORBIDDEN, "Setup token rejected".to_string())
            }
            AppError::Config(detail) => {
                tracing::error!(detail, "Server misconfiguration");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server misconfiguration".to_string())
            }
            AppError::UpdateFailed => {
                tracing::error!("Conditional update matched no document");
                (StatusCode::INTERNAL_SERVER_ERROR, "Update failed".to_string())
            }
            AppError::Internal => {
                tracing::error!("Internal server error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}
