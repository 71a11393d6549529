// crates/backend-lib/src/middleware/auth_gate.rs

//! Guard for routes that need a logged-in user.
use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use cyberaware_common::FlashCategory;

use crate::auth::Session;
use crate::handlers::redirect_to;
use crate::metrics::AUTH_GATE_REDIRECT;

/// Notice shown when an anonymous visitor hits a gated route
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login first.";

/// Route layer: forward authenticated requests untouched, send everyone else to `/login`
pub async fn require_auth(session: Session, request: Request<Body>, next: Next) -> Response {
    if session.is_authenticated() {
        return next.run(request).await;
    }

    tracing::debug!(path = %request.uri().path(), "unauthenticated request to gated route");
    login_redirect(&session)
}

fn login_redirect(session: &Session) -> Response {
    metrics::counter!(AUTH_GATE_REDIRECT).increment(1);
    session.flash(FlashCategory::Warning, LOGIN_REQUIRED_MESSAGE);
    redirect_to("/login")
}

/// The logged-in user. Extracting it on an anonymous request answers with the
/// same notice and redirect as [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match session.user() {
            Some(user) => Ok(AuthUser(user)),
            None => Err(login_redirect(&session)),
        }
    }
}
