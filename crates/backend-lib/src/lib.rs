// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core functionality for the authapp user management server: user store,
//! password hashing, bearer tokens and the HTTP surface over them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod storage;
pub mod validation;

use crate::auth::{AuthService, DefaultAuth, PasswordHasher, TokenIssuer};
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::{InMemoryUserStore, UserStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// User store, shared with the authentication service
    pub users: Arc<dyn UserStore>,
    /// Configuration settings
    pub settings: Arc<Settings>,
    /// When this state was built, reported by the system endpoints
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new application state backed by an in-memory store
    pub fn new(config: &Settings) -> Result<Self, AppError> {
        Self::with_store(Arc::new(InMemoryUserStore::new()), config)
    }

    /// Create a new application state over the given store
    pub fn with_store(users: Arc<dyn UserStore>, config: &Settings) -> Result<Self, AppError> {
        let hasher = PasswordHasher::with_cost(config.auth.password_cost_log_n)?;
        let tokens = TokenIssuer::with_ttl(config.token_ttl());
        let auth = Arc::new(DefaultAuth::new(users.clone(), hasher, tokens));

        Ok(Self {
            auth,
            users,
            settings: Arc::new(config.clone()),
            started_at: Utc::now(),
        })
    }
}
