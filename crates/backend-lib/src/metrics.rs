// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_REGISTER_SUCCESS: &str = "auth.register.success";
pub const AUTH_REGISTER_REJECTED: &str = "auth.register.rejected";
pub const AUTH_LOGIN_SUCCESS: &str = "auth.login.success";
pub const AUTH_LOGIN_FAILURE: &str = "auth.login.failure";
pub const AUTH_LOGOUT: &str = "auth.logout";
pub const AUTH_GATE_REDIRECT: &str = "auth.gate.redirect";
pub const SESSION_COOKIE_REJECTED: &str = "session.cookie.rejected";
