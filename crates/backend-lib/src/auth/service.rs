// =============
// crates/backend-lib/src/auth/service.rs
// =============
//! This module defines the `AuthService` trait, the entry point for
//! registration, login, logout and token validation.
use crate::error::AppError;
use crate::storage::User;

pub trait AuthService: Send + Sync {
    /// Register a new active user. Fails with `AlreadyExists` if the username is taken.
    fn register_new_user(&self, username: &str, password: &str, email: &str)
        -> Result<User, AppError>;

    /// Check credentials and issue a token that becomes the user's only current one.
    fn authenticate_user(&self, username: &str, password: &str) -> Result<String, AppError>;

    /// Drop the user's current token. Idempotent.
    fn logout_user(&self, username: &str);

    /// Username bound to `token`, if it is correctly signed, unexpired and still current.
    fn validate_token_and_get_username(&self, token: &str) -> Result<String, AppError>;

    /// Mark an account inactive so it can no longer log in.
    fn deactivate_user(&self, username: &str) -> Result<User, AppError>;
}
