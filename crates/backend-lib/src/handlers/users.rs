// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
//! User listing, lookup and deactivation endpoints.
use crate::error::AppError;
use crate::AppState;
use authapp_common::{ApiResponse, UserProfile};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// `GET /api/users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<UserProfile>>> {
    let users: Vec<UserProfile> = state.users.find_all().iter().map(|u| u.profile()).collect();
    let message = format!("{} users retrieved", users.len());
    Json(ApiResponse::ok(message, users))
}

/// `GET /api/users/{username}`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let user = state
        .users
        .find_by_username(&username)
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::ok("User found", user.profile())))
}

/// `PUT /api/users/{username}/deactivate`
pub async fn deactivate_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<UserProfile>>, AppError> {
    let user = state.auth.deactivate_user(&username)?;
    Ok(Json(ApiResponse::ok(
        "User account deactivated successfully",
        user.profile(),
    )))
}
