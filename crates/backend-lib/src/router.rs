// ============================
// cyberaware-backend-lib/src/router.rs
// ============================
//! HTTP router.
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{account, site};
use crate::middleware::{require_auth, session_layer};
use crate::storage::CredentialStore;
use crate::AppState;

/// Create the router.
///
/// `/dashboard`, `/about`, `/contact` and `/resources` sit behind the auth gate.
/// `/`, `/register`, `/login` and `/logout` stay reachable without a session.
pub fn create_router<S: CredentialStore + Clone + 'static>(state: Arc<AppState<S>>) -> Router {
    let gated = Router::new()
        .route("/dashboard", get(site::dashboard))
        .route("/about", get(site::about))
        .route("/contact", get(site::contact))
        .route("/resources", get(site::resources))
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/", get(site::home))
        .route(
            "/register",
            get(account::register_form).post(account::register::<S>),
        )
        .route("/login", get(account::login_form).post(account::login::<S>))
        .route("/logout", get(account::logout))
        .merge(gated)
        .fallback(site::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_layer::<S>,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
