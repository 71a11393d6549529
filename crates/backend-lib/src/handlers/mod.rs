// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers, one per route.
pub mod account;
pub mod site;

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use cyberaware_common::Flash;

use crate::auth::Session;
use crate::pages::{self, PageContext};

/// `302 Found` redirect
pub fn redirect_to(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Render a page, consuming the session's pending notices
pub(crate) fn render(session: &Session, page: impl FnOnce(&PageContext<'_>) -> String) -> Html<String> {
    render_with(session, session.take_flashes(), page)
}

/// Render a page and leave pending notices for the next one
pub(crate) fn render_keeping_notices(
    session: &Session,
    page: impl FnOnce(&PageContext<'_>) -> String,
) -> Html<String> {
    render_with(session, Vec::new(), page)
}

fn render_with(
    session: &Session,
    flashes: Vec<Flash>,
    page: impl FnOnce(&PageContext<'_>) -> String,
) -> Html<String> {
    let user = session.user();
    let current_time = pages::current_time();

    Html(page(&PageContext {
        user: user.as_deref(),
        flashes: &flashes,
        current_time: &current_time,
    }))
}
