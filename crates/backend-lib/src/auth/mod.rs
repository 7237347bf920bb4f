// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod token;
mod service;
mod service_impl;

pub use password::{PasswordHasher, DEFAULT_COST_LOG_N};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use token::{TokenClaims, TokenIssuer, DEFAULT_TOKEN_TTL};
