// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models mirrored from API responses.

pub mod auth;
pub mod fitbit;
pub mod message;
pub mod participant;

pub use auth::{LoginCredentials, Token, User};
pub use fitbit::{FitbitAuthRequest, FitbitData, FitbitToken};
pub use message::{
    Message, MessageContent, MessageContentCreate, MessageContentQuery, MessageContentUpdate,
    MessageQuery, MessageStats, MessageStatsQuery, SmsWindowTime, WindowBoundary,
};
pub use participant::{Participant, ParticipantCreate, ParticipantQuery, ParticipantUpdate};

use serde::{Deserialize, Serialize};

/// Entities addressed by a numeric server-assigned ID.
pub trait Identified {
    fn id(&self) -> i64;
}

/// Acknowledgement returned by trigger endpoints
/// (`{"message": "Fitbit data fetch triggered for all participants"}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Any other fields the endpoint includes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
