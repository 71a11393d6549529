// ============================
// crates/backend-lib/src/handlers/site.rs
// ============================
//! Informational pages.
use axum::{http::StatusCode, response::Html};

use super::{render, render_keeping_notices};
use crate::auth::Session;
use crate::middleware::AuthUser;
use crate::pages;

/// `GET /`
pub async fn home(session: Session) -> Html<String> {
    render(&session, pages::home)
}

/// `GET /dashboard`
pub async fn dashboard(AuthUser(user): AuthUser, session: Session) -> Html<String> {
    render(&session, |ctx| pages::dashboard(ctx, &user))
}

/// `GET /about`
pub async fn about(_user: AuthUser, session: Session) -> Html<String> {
    render(&session, pages::about)
}

/// `GET /contact`
pub async fn contact(_user: AuthUser, session: Session) -> Html<String> {
    render(&session, pages::contact)
}

/// `GET /resources`
pub async fn resources(_user: AuthUser, session: Session) -> Html<String> {
    render(&session, pages::resources)
}

/// Fallback for unknown routes. Stray requests (`/favicon.ico`) must not eat
/// notices queued for the page after a redirect.
pub async fn not_found(session: Session) -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, render_keeping_notices(&session, pages::not_found))
}
