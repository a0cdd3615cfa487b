// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types with a consistent view of API failures.

use crate::storage::StorageError;
use serde::Deserialize;

/// Error returned by every API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the session (HTTP 401). The session has already
    /// been cleared by the time the caller sees this.
    #[error("Authentication required")]
    Unauthorized { detail: Option<String> },

    #[error("HTTP {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Http { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `detail` string from the error response body, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Human-readable message for store error fields: the server's detail
    /// when it sent one, otherwise `fallback`.
    pub fn describe(&self, fallback: &str) -> String {
        self.detail()
            .filter(|d| !d.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Error body shape used by the API (`{"detail": "..."}`).
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Extract the `detail` string from an error response body.
///
/// Validation errors carry a structured `detail` array; those are not
/// meaningful as a single message and yield `None`.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
