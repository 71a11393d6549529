// ================
// common/src/lib.rs
// ================
//! Common types shared by the Cyber Awareness server and its tests.
//! This module defines the payloads carried inside the signed cookies.

use serde::{Deserialize, Serialize};

/// Payload of the session cookie
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPayload {
    /// Username of the authenticated user, if any
    pub user: Option<String>,
}

/// Category of a flash notice, used by the page layout for styling
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Danger,
    Warning,
    Info,
}

impl FlashCategory {
    /// CSS class name for this category
    pub fn as_str(self) -> &'static str {
        match self {
            FlashCategory::Success => "success",
            FlashCategory::Danger => "danger",
            FlashCategory::Warning => "warning",
            FlashCategory::Info => "info",
        }
    }
}

/// A one-time notice queued for display on the next rendered page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// Notice category
    pub category: FlashCategory,
    /// Human readable message
    pub message: String,
}

impl Flash {
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}
