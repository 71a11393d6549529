// ============================
// crates/backend-lib/src/handlers/account.rs
// ============================
//! Register, login and logout.
//!
//! Validation failures are shown to the user as flash notices on the
//! re-rendered form. Only unexpected failures (hashing) become an [`AppError`]
//! response.
use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use cyberaware_common::FlashCategory;
use serde::Deserialize;

use super::{redirect_to, render};
use crate::auth::{Credentials, Session};
use crate::error::AppError;
use crate::metrics::AUTH_LOGOUT;
use crate::pages;
use crate::storage::CredentialStore;
use crate::AppState;

pub const MISSING_FIELDS_MESSAGE: &str = "Username and password are required.";
pub const USERNAME_TAKEN_MESSAGE: &str = "Username already exists! Choose another.";
pub const REGISTERED_MESSAGE: &str = "Registration successful! You can now login.";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials. Try again.";
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

/// Fields posted by the register and login forms
#[derive(Deserialize)]
pub struct CredentialsForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialsForm {
    /// Absent fields are rejected; empty values go through the policy and
    /// credential checks like any other value.
    fn into_credentials(self) -> Result<Credentials, AppError> {
        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok(Credentials::new(username, password)),
            _ => Err(AppError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

fn parse_credentials(
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Credentials, AppError> {
    match form {
        Ok(Form(form)) => form.into_credentials(),
        Err(rejection) => {
            tracing::debug!("rejected form submission: {rejection}");
            Err(AppError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()))
        },
    }
}

/// Render a form with a `danger` notice and the given status
fn form_error(
    session: &Session,
    status: StatusCode,
    message: impl Into<String>,
    page: impl FnOnce(&pages::PageContext<'_>) -> String,
) -> Response {
    session.flash(FlashCategory::Danger, message);
    (status, render(session, page)).into_response()
}

/// `GET /register`
pub async fn register_form(session: Session) -> Html<String> {
    render(&session, |ctx| pages::register(ctx, ""))
}

/// `POST /register`
pub async fn register<S: CredentialStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    session: Session,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Response, AppError> {
    let credentials = match parse_credentials(form) {
        Ok(credentials) => credentials,
        Err(_) => {
            return Ok(form_error(&session, StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE, |ctx| {
                pages::register(ctx, "")
            }))
        },
    };
    let username = credentials.username.clone();

    match state.auth.register(credentials).await {
        Ok(()) => {
            session.flash(FlashCategory::Success, REGISTERED_MESSAGE);
            Ok(redirect_to("/login"))
        },
        Err(AppError::UsernameTaken(_)) => Ok(form_error(
            &session,
            StatusCode::OK,
            USERNAME_TAKEN_MESSAGE,
            |ctx| pages::register(ctx, ""),
        )),
        Err(AppError::WeakPassword) => Ok(form_error(
            &session,
            StatusCode::OK,
            state.auth.requirements().describe(),
            |ctx| pages::register(ctx, &username),
        )),
        Err(e) => Err(e),
    }
}

/// `GET /login`
pub async fn login_form(session: Session) -> Response {
    if session.is_authenticated() {
        return redirect_to("/dashboard");
    }
    render(&session, |ctx| pages::login(ctx, "")).into_response()
}

/// `POST /login`
pub async fn login<S: CredentialStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    session: Session,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<Response, AppError> {
    if session.is_authenticated() {
        return Ok(redirect_to("/dashboard"));
    }

    let credentials = match parse_credentials(form) {
        Ok(credentials) => credentials,
        Err(_) => {
            return Ok(form_error(&session, StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE, |ctx| {
                pages::login(ctx, "")
            }))
        },
    };

    match state.auth.authenticate(&credentials).await {
        Ok(()) => {
            session.set_user(credentials.username.clone());
            session.flash(FlashCategory::Success, LOGIN_SUCCESS_MESSAGE);
            Ok(redirect_to("/dashboard"))
        },
        Err(AppError::InvalidCredentials) => Ok(form_error(
            &session,
            StatusCode::OK,
            INVALID_CREDENTIALS_MESSAGE,
            |ctx| pages::login(ctx, &credentials.username),
        )),
        Err(e) => Err(e),
    }
}

/// `GET /logout`
pub async fn logout(session: Session) -> Response {
    if let Some(user) = session.user() {
        tracing::info!(username = %user, "logged out");
    }
    metrics::counter!(AUTH_LOGOUT).increment(1);
    session.clear_user();
    session.flash(FlashCategory::Info, LOGGED_OUT_MESSAGE);
    redirect_to("/login")
}
