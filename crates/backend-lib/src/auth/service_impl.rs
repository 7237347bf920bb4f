// =============
// crates/backend-lib/src/auth/service_impl.rs
// =============
use super::{AuthService, PasswordHasher, TokenIssuer};
use crate::error::AppError;
use crate::metrics as keys;
use crate::storage::{User, UserStore};
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service backed by an injected `UserStore`
pub struct DefaultAuth {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl DefaultAuth {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    fn login_failed(username: &str, err: AppError) -> AppError {
        counter!(keys::LOGIN_FAILED, "reason" => err.error_code()).increment(1);
        warn!(%username, reason = %err, "login rejected");
        err
    }
}

impl AuthService for DefaultAuth {
    fn register_new_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<User, AppError> {
        // Fail fast before paying for a hash
        if self.users.exists_by_username(username) {
            debug!(%username, "registration rejected, username taken");
            return Err(AppError::AlreadyExists);
        }

        let user = User::new(
            uuid::Uuid::new_v4().to_string(),
            username.to_string(),
            self.hasher.encode(password)?,
            email.to_string(),
        );

        // A concurrent registration may have claimed the name since the check
        let user = self.users.insert_new(user)?;

        counter!(keys::USER_REGISTERED).increment(1);
        info!(%username, user_id = %user.id, "user registered");
        Ok(user)
    }

    fn authenticate_user(&self, username: &str, password: &str) -> Result<String, AppError> {
        // Existence strictly before any hash comparison
        let user = self
            .users
            .find_by_username(username)
            .ok_or_else(|| Self::login_failed(username, AppError::NotFound))?;

        if !self.hasher.matches(password, &user.password_hash)? {
            return Err(Self::login_failed(username, AppError::InvalidCredentials));
        }

        if !user.account_active {
            return Err(Self::login_failed(username, AppError::AccountInactive));
        }

        let token = self.tokens.issue(&user.username)?;
        self.users.store_token(&user.username, &token);

        counter!(keys::LOGIN_SUCCEEDED).increment(1);
        info!(%username, "login succeeded");
        Ok(token)
    }

    fn logout_user(&self, username: &str) {
        self.users.remove_token(username);
        counter!(keys::LOGOUT).increment(1);
        info!(%username, "user logged out");
    }

    fn validate_token_and_get_username(&self, token: &str) -> Result<String, AppError> {
        if token.trim().is_empty() {
            counter!(keys::TOKEN_REJECTED).increment(1);
            return Err(AppError::InvalidToken);
        }

        // Parse, signature and expiry failures all surface as InvalidToken
        let username = self.tokens.validate_and_extract_username(token).map_err(|e| {
            counter!(keys::TOKEN_REJECTED).increment(1);
            debug!(error = %e, "token failed verification");
            AppError::InvalidToken
        })?;

        if !self.users.is_token_valid(&username, token) {
            counter!(keys::TOKEN_REJECTED).increment(1);
            debug!(%username, "token is not the current one");
            return Err(AppError::InvalidToken);
        }

        Ok(username)
    }

    fn deactivate_user(&self, username: &str) -> Result<User, AppError> {
        let mut user = self
            .users
            .find_by_username(username)
            .ok_or(AppError::NotFound)?;
        user.account_active = false;
        let user = self.users.update(user)?;

        counter!(keys::USER_DEACTIVATED).increment(1);
        info!(%username, "user deactivated");
        Ok(user)
    }
}
