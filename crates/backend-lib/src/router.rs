// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router.
use crate::handlers::{auth, system, users};
use crate::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/users", get(users::list_users))
        .route("/api/users/{username}", get(users::get_user))
        .route("/api/users/{username}/deactivate", put(users::deactivate_user))
        .route("/api/system/health", get(system::health))
        .route("/api/system/info", get(system::info))
        .route("/api/system/stats", get(system::stats))
        .route("/api/system/version", get(system::version))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
