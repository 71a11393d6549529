// crates/backend-lib/src/middleware/session.rs

//! Session boundary: signed cookies in, [`Session`] extension through, `Set-Cookie` out.
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use cyberaware_common::{Flash, SessionPayload};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::{CookieSigner, Session};
use crate::config::CookieSettings;
use crate::metrics::SESSION_COOKIE_REJECTED;
use crate::storage::CredentialStore;
use crate::AppState;

/// Decode the session before the handler runs and persist its changes afterwards
pub async fn session_layer<S: CredentialStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let cookies = &state.settings.cookie;
    let payload: SessionPayload =
        read_signed_cookie(request.headers(), &cookies.session_name, &state.signer)
            .unwrap_or_default();
    let flashes: Vec<Flash> =
        read_signed_cookie(request.headers(), &cookies.flash_name, &state.signer)
            .unwrap_or_default();

    let session = Session::from_cookies(payload, flashes);
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    if let Some(payload) = session.changed_payload() {
        let value = payload.user.is_some().then_some(&payload);
        write_cookie(&mut response, cookies, &cookies.session_name, value, &state.signer);
    }

    if let Some(flashes) = session.changed_flashes() {
        let value = (!flashes.is_empty()).then_some(&flashes);
        write_cookie(&mut response, cookies, &cookies.flash_name, value, &state.signer);
    }

    response
}

/// Find a cookie by name in the request's `Cookie` headers
pub fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn read_signed_cookie<T: DeserializeOwned>(
    headers: &HeaderMap,
    name: &str,
    signer: &CookieSigner,
) -> Option<T> {
    let raw = find_cookie(headers, name)?;
    let value = signer.verify(raw);
    if value.is_none() {
        metrics::counter!(SESSION_COOKIE_REJECTED).increment(1);
        tracing::debug!(cookie = name, "ignoring cookie with invalid signature");
    }
    value
}

/// Append a `Set-Cookie` header; `None` expires the cookie
fn write_cookie<T: Serialize>(
    response: &mut Response,
    settings: &CookieSettings,
    name: &str,
    value: Option<&T>,
    signer: &CookieSigner,
) {
    let mut attributes = String::from("Path=/; HttpOnly; SameSite=Lax");
    if settings.secure {
        attributes.push_str("; Secure");
    }

    let cookie = match value {
        Some(value) => match signer.sign(value) {
            Ok(signed) => format!("{name}={signed}; {attributes}"),
            Err(e) => {
                tracing::error!(cookie = name, "failed to sign cookie: {e}");
                return;
            },
        },
        None => format!("{name}=; Max-Age=0; {attributes}"),
    };

    match HeaderValue::from_str(&cookie) {
        Ok(header_value) => {
            response.headers_mut().append(header::SET_COOKIE, header_value);
        },
        Err(e) => tracing::error!(cookie = name, "invalid Set-Cookie header: {e}"),
    }
}
