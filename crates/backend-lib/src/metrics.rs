// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const USER_REGISTERED: &str = "auth.user.registered";
pub const LOGIN_SUCCEEDED: &str = "auth.login.succeeded";
pub const LOGIN_FAILED: &str = "auth.login.failed";
pub const LOGOUT: &str = "auth.logout";
pub const TOKEN_REJECTED: &str = "auth.token.rejected";
pub const USER_DEACTIVATED: &str = "auth.user.deactivated";
