// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Storage abstraction with an in-memory implementation.
//!
//! The store owns two maps: username to user record, and username to the
//! currently valid bearer token. Every mutation of either map goes through
//! this module.
use crate::error::AppError;
use authapp_common::UserProfile;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Opaque unique identifier (UUID v4), never reused
    pub id: String,
    /// Unique, immutable after creation
    pub username: String,
    /// PHC encoded password hash. Never leaves the server.
    pub password_hash: String,
    pub email_address: String,
    pub registration_date: DateTime<Utc>,
    pub account_active: bool,
}

impl User {
    /// Create a new active user registered now
    pub fn new(id: String, username: String, password_hash: String, email_address: String) -> Self {
        Self {
            id,
            username,
            password_hash,
            email_address,
            registration_date: Utc::now(),
            account_active: true,
        }
    }

    /// Public view without the password hash
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.id.clone(),
            username: self.username.clone(),
            email_address: self.email_address.clone(),
            registration_date: self.registration_date,
            account_active: self.account_active,
        }
    }
}

/// Trait for user storage backends
///
/// Implementations must be safe to call from many request handlers at once
/// without external locking, and no operation may block waiting on another.
pub trait UserStore: Send + Sync {
    /// Insert or overwrite by username. Does not check uniqueness.
    fn save(&self, user: User) -> User;

    /// Insert only if the username is free, atomically.
    fn insert_new(&self, user: User) -> Result<User, AppError>;

    fn find_by_username(&self, username: &str) -> Option<User>;

    /// Linear scan over all records
    fn find_by_id(&self, id: &str) -> Option<User>;

    /// Snapshot of every record, oldest registration first
    fn find_all(&self) -> Vec<User>;

    /// Replace an existing record. Fails if the username is not present.
    fn update(&self, user: User) -> Result<User, AppError>;

    /// Remove a user and its token. Returns whether a record existed.
    fn delete(&self, username: &str) -> bool;

    fn exists_by_username(&self, username: &str) -> bool;

    /// Linear scan over all records
    fn exists_by_email(&self, email: &str) -> bool;

    fn count_all(&self) -> u64;

    fn count_active(&self) -> u64;

    /// Number of usernames holding a current token
    fn count_tokens(&self) -> u64;

    /// Record `token` as the current one for `username`, replacing any other
    fn store_token(&self, username: &str, token: &str);

    fn remove_token(&self, username: &str);

    fn get_token(&self, username: &str) -> Option<String>;

    fn has_token(&self, username: &str) -> bool;

    /// Exact match against the currently stored token
    fn is_token_valid(&self, username: &str, token: &str) -> bool;

    fn clear_all_tokens(&self);
}

/// In-memory implementation of the `UserStore` trait
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<DashMap<String, User>>,
    tokens: Arc<DashMap<String, String>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn save(&self, user: User) -> User {
        self.users.insert(user.username.clone(), user.clone());
        user
    }

    fn insert_new(&self, user: User) -> Result<User, AppError> {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(AppError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            },
        }
    }

    fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|u| u.value().clone())
    }

    fn find_by_id(&self, id: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.value().clone())
    }

    fn find_all(&self) -> Vec<User> {
        let mut all: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        all.sort_by(|a, b| {
            a.registration_date
                .cmp(&b.registration_date)
                .then_with(|| a.username.cmp(&b.username))
        });
        all
    }

    fn update(&self, user: User) -> Result<User, AppError> {
        match self.users.get_mut(&user.username) {
            Some(mut existing) => {
                *existing = user.clone();
                Ok(user)
            },
            None => Err(AppError::UpdateTargetMissing(user.username)),
        }
    }

    fn delete(&self, username: &str) -> bool {
        if self.users.remove(username).is_some() {
            self.tokens.remove(username);
            return true;
        }
        false
    }

    fn exists_by_username(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    fn exists_by_email(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.email_address == email)
    }

    fn count_all(&self) -> u64 {
        self.users.len() as u64
    }

    fn count_active(&self) -> u64 {
        self.users.iter().filter(|u| u.account_active).count() as u64
    }

    fn count_tokens(&self) -> u64 {
        self.tokens.len() as u64
    }

    fn store_token(&self, username: &str, token: &str) {
        self.tokens.insert(username.to_string(), token.to_string());
    }

    fn remove_token(&self, username: &str) {
        self.tokens.remove(username);
    }

    fn get_token(&self, username: &str) -> Option<String> {
        self.tokens.get(username).map(|t| t.value().clone())
    }

    fn has_token(&self, username: &str) -> bool {
        self.tokens.contains_key(username)
    }

    fn is_token_valid(&self, username: &str, token: &str) -> bool {
        self.tokens
            .get(username)
            .is_some_and(|stored| stored.as_str() == token)
    }

    fn clear_all_tokens(&self) {
        self.tokens.clear();
    }
}
