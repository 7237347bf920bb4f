// ============================
// crates/backend-lib/src/handlers/system.rs
// ============================
//! Health, info, stats and version endpoints.
use crate::AppState;
use authapp_common::{ApiResponse, UserStats};
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

const API_NAME: &str = "User Management API";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub application_name: String,
    pub version: String,
    pub start_time: DateTime<Utc>,
    pub uptime_secs: i64,
    pub total_users: u64,
    pub active_users: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version: String,
    pub api_name: &'static str,
}

/// `GET /api/system/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthStatus>> {
    let data = HealthStatus {
        status: "UP",
        service: state.settings.app.name.clone(),
        version: state.settings.app.version.clone(),
        timestamp: Utc::now(),
    };
    Json(ApiResponse::ok("Service is running", data))
}

/// `GET /api/system/info`
pub async fn info(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SystemInfo>> {
    let now = Utc::now();
    let data = SystemInfo {
        application_name: state.settings.app.name.clone(),
        version: state.settings.app.version.clone(),
        start_time: state.started_at,
        uptime_secs: (now - state.started_at).num_seconds(),
        total_users: state.users.count_all(),
        active_users: state.users.count_active(),
    };
    Json(ApiResponse::ok("System information", data))
}

/// `GET /api/system/stats`
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<UserStats>> {
    let total = state.users.count_all();
    let active = state.users.count_active();
    let data = UserStats {
        total_registered_users: total,
        active_users: active,
        // Counts are read separately, so guard against a registration in between
        inactive_users: total.saturating_sub(active),
        users_with_active_tokens: state.users.count_tokens(),
        last_updated: Utc::now(),
    };
    Json(ApiResponse::ok("User statistics", data))
}

/// `GET /api/system/version`
pub async fn version(State(state): State<Arc<AppState>>) -> Json<ApiResponse<VersionInfo>> {
    let data = VersionInfo {
        version: state.settings.app.version.clone(),
        api_name: API_NAME,
    };
    Json(ApiResponse::ok("Version information", data))
}
