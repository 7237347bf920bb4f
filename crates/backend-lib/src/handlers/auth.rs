// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Registration, login and logout endpoints.
use super::{json_body, run_blocking};
use crate::error::AppError;
use crate::validation;
use crate::AppState;
use authapp_common::{
    ApiResponse, LoginGranted, LoginRequest, RegisterRequest, RegisteredUser, BEARER_TOKEN_TYPE,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use std::sync::Arc;

const BEARER_PREFIX: &str = "Bearer ";

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RegisteredUser>>, AppError> {
    let req = json_body(payload)?;
    validation::validate_registration(&req)?;

    let auth = state.auth.clone();
    let user = run_blocking(move || {
        auth.register_new_user(&req.username, &req.password, &req.email_address)
    })
    .await?;

    let data = RegisteredUser {
        user_id: user.id,
        username: user.username,
        email_address: user.email_address,
        registration_date: user.registration_date,
    };
    Ok(Json(ApiResponse::ok("User registered successfully", data)))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginGranted>>, AppError> {
    let req = json_body(payload)?;
    validation::validate_login(&req)?;

    let auth = state.auth.clone();
    let username = req.username.clone();
    let token = run_blocking(move || auth.authenticate_user(&req.username, &req.password)).await?;

    let data = LoginGranted {
        username,
        auth_token: token,
        token_type: BEARER_TOKEN_TYPE.to_string(),
    };
    Ok(Json(ApiResponse::ok("Login successful", data)))
}

/// `POST /api/auth/logout` with `Authorization: Bearer <token>`
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let token = bearer_token(&headers)?;
    let username = state.auth.validate_token_and_get_username(token)?;
    state.auth.logout_user(&username);

    Ok(Json(ApiResponse::message("Logout successful")))
}

/// Pull the token out of the Authorization header.
///
/// A missing or blank header is a malformed request; anything that is not a
/// bearer credential is an invalid token.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .map(|v| v.to_str().map_err(|_| AppError::InvalidToken))
        .transpose()?
        .unwrap_or_default();

    if value.trim().is_empty() {
        return Err(AppError::MissingAuthorization);
    }

    value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AppError::InvalidToken)
}
