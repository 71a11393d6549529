// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the Cyber Awareness server.

pub mod auth_gate;
pub mod session;

pub use auth_gate::{require_auth, AuthUser, LOGIN_REQUIRED_MESSAGE};
pub use session::session_layer;
