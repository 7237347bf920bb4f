// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use authapp_common::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error kinds. The HTTP layer maps these to status codes by
/// variant, never by message text.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("User already exists")]
    AlreadyExists,

    #[error("User not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found for update: {0}")]
    UpdateTargetMissing(String),

    #[error("Missing Authorization header")]
    MissingAuthorization,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Password hash error: {0}")]
    PasswordHash(#[from] scrypt::password_hash::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AlreadyExists => StatusCode::CONFLICT,
            AppError::NotFound | AppError::UpdateTargetMissing(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials | AppError::AccountInactive | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            },
            AppError::MissingAuthorization | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::AlreadyExists => "USR_001",
            AppError::NotFound => "USR_002",
            AppError::UpdateTargetMissing(_) => "USR_003",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::AccountInactive => "AUTH_002",
            AppError::MissingAuthorization => "AUTH_003",
            AppError::InvalidToken => "AUTH_004",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::PasswordHash(_) => "HASH_001",
            AppError::Token(_) => "TOKEN_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::AlreadyExists => "Username already registered".to_string(),
            AppError::NotFound | AppError::UpdateTargetMissing(_) => "User not found".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::AccountInactive => "Account is inactive".to_string(),
            AppError::InvalidToken => "Invalid token".to_string(),
            AppError::MissingAuthorization => "Authorization header is required".to_string(),
            // Field level validation messages are meant for the caller
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::PasswordHash(_) | AppError::Token(_) | AppError::Internal(_) => {
                "An internal server error occurred".to_string()
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body: ApiResponse<()> = ApiResponse::failure(self.error_code(), message);
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_app_error_display() {
        assert_eq!(AppError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(
            AppError::UpdateTargetMissing("ghost".to_string()).to_string(),
            "User not found for update: ghost"
        );
        assert!(AppError::InvalidInput("bad email".to_string())
            .to_string()
            .contains("bad email"));
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(AppError::AlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::AccountInactive.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::MissingAuthorization.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidInput("expected value".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_error_codes_are_unique() {
        let errors = [
            AppError::AlreadyExists,
            AppError::NotFound,
            AppError::UpdateTargetMissing("x".to_string()),
            AppError::InvalidCredentials,
            AppError::AccountInactive,
            AppError::MissingAuthorization,
            AppError::InvalidToken,
            AppError::InvalidInput("x".to_string()),
            AppError::Internal("x".to_string()),
        ];
        let mut codes: Vec<_> = errors.iter().map(AppError::error_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_sanitized_message_hides_internals() {
        let err = AppError::Internal("db password is hunter2".to_string());
        assert!(!err.sanitized_message().contains("hunter2"));
    }

    #[tokio::test]
    async fn test_error_serialization() {
        let response = AppError::AlreadyExists.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response_headers = response.headers();
        assert!(response_headers
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("application/json"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["errorCode"], serde_json::json!("USR_001"));
    }

    #[test]
    fn test_error_from_impls() {
        let app_err: AppError = scrypt::password_hash::Error::Password.into();
        assert!(matches!(app_err, AppError::PasswordHash(_)));
    }
}
