/// Error types for Board Service
///
/// Every failure a caller can observe maps onto one of four kinds. Errors are
/// converted to JSON HTTP responses at the handler boundary.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use crypto_core::{PasswordError, TokenError};

/// Result type for board-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Payload, path or credential carrier could not be parsed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing, invalid or expired token, or bad credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Referenced post does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Hashing or signing failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = match self {
            AppError::Internal(detail) => {
                // Don't leak internal details to clients
                tracing::error!(error = %detail, "Request failed with internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": error_msg,
            "status": status.as_u16(),
        }))
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid | TokenError::Expired => {
                AppError::Unauthorized("Invalid or expired token".to_string())
            }
            TokenError::WeakSecret | TokenError::Signing(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        AppError::Internal(format!("Blocking task failed: {}", err))
    }
}
