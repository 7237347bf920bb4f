// ================
// crates/common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between authapp clients and the server.
//! This module defines the JSON request bodies, the response envelope and
//! the payloads carried inside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token type advertised alongside every issued token
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Body of `POST /api/auth/register`
/// # Fields
/// * `username` - Desired unique username (3-50 chars)
/// * `password` - Plaintext password (min 6 chars), hashed server side
/// * `email_address` - Contact email
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email_address: String,
}

/// Body of `POST /api/auth/login`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Payload returned after a successful registration
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub user_id: String,
    pub username: String,
    pub email_address: String,
    pub registration_date: DateTime<Utc>,
}

/// Payload returned after a successful login
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginGranted {
    pub username: String,
    pub auth_token: String,
    /// Always [`BEARER_TOKEN_TYPE`]
    pub token_type: String,
}

/// Public view of a user record. The password hash never leaves the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    pub email_address: String,
    pub registration_date: DateTime<Utc>,
    pub account_active: bool,
}

/// Aggregate user counters exposed by `GET /api/system/stats`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_registered_users: u64,
    pub active_users: u64,
    pub inactive_users: u64,
    pub users_with_active_tokens: u64,
    pub last_updated: DateTime<Utc>,
}

/// Envelope wrapped around every HTTP response body
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Human readable outcome
    pub message: String,
    /// Payload, absent on failures and on message-only replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Stable machine readable code, present on failures only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// When the response was produced
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error_code: None,
            timestamp: Utc::now(),
        }
    }

    /// Successful response without a payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error_code: None,
            timestamp: Utc::now(),
        }
    }

    /// Failed response tagged with an error code
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error_code: Some(code.into()),
            timestamp: Utc::now(),
        }
    }
}
