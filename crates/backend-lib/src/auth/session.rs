// ============================
// cyberaware-backend-lib/src/auth/session.rs
// ============================
//! Request-scoped session context.
//!
//! The session boundary middleware decodes the signed cookies into a
//! [`Session`] and stores it in the request extensions. Handlers mutate it
//! through the extractor; the middleware writes back whatever changed.
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use cyberaware_common::{Flash, FlashCategory, SessionPayload};
use parking_lot::Mutex;

use crate::error::AppError;

#[derive(Debug, Default)]
struct SessionState {
    user: Option<String>,
    flashes: Vec<Flash>,
    user_changed: bool,
    flashes_changed: bool,
}

/// Session handle shared between the session middleware and one request's handler
#[derive(Clone, Debug, Default)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    /// Build a session from decoded cookie contents
    pub fn from_cookies(payload: SessionPayload, flashes: Vec<Flash>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                user: payload.user,
                flashes,
                ..SessionState::default()
            })),
        }
    }

    /// Username of the authenticated user, if any
    pub fn user(&self) -> Option<String> {
        self.state.lock().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.lock().user.is_some()
    }

    /// Mark the session as authenticated for `user`
    pub fn set_user(&self, user: impl Into<String>) {
        let mut state = self.state.lock();
        state.user = Some(user.into());
        state.user_changed = true;
    }

    /// Drop the authenticated user. No-op when nobody is logged in.
    pub fn clear_user(&self) {
        let mut state = self.state.lock();
        if state.user.take().is_some() {
            state.user_changed = true;
        }
    }

    /// Queue a notice for the next rendered page
    pub fn flash(&self, category: FlashCategory, message: impl Into<String>) {
        let mut state = self.state.lock();
        state.flashes.push(Flash::new(category, message));
        state.flashes_changed = true;
    }

    /// Take all pending notices for display
    pub fn take_flashes(&self) -> Vec<Flash> {
        let mut state = self.state.lock();
        if !state.flashes.is_empty() {
            state.flashes_changed = true;
        }
        std::mem::take(&mut state.flashes)
    }

    /// Session cookie payload, if it has to be rewritten
    pub fn changed_payload(&self) -> Option<SessionPayload> {
        let state = self.state.lock();
        state.user_changed.then(|| SessionPayload {
            user: state.user.clone(),
        })
    }

    /// Pending notices, if the flash cookie has to be rewritten
    pub fn changed_flashes(&self) -> Option<Vec<Flash>> {
        let state = self.state.lock();
        state.flashes_changed.then(|| state.flashes.clone())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("Session layer is not installed".to_string()))
    }
}
