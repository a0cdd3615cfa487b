// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitbit integration records.

use super::Identified;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// OAuth tokens the server holds for one participant's Fitbit account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct FitbitToken {
    pub id: i64,
    pub participant_id: i64,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Identified for FitbitToken {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Body of `POST /fitbit/auth`: manually registered tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitbitAuthRequest {
    pub participant_id: i64,
    pub access_token: String,
    pub refresh_token: String,
    /// ISO 8601 expiry
    pub expires_at: String,
}

/// One day of exported Fitbit data (steps, heart_rate, sleep, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct FitbitData {
    pub id: i64,
    pub token_id: i64,
    pub data_type: String,
    pub date: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "Record<string, unknown>"))]
    pub data: serde_json::Map<String, serde_json::Value>,
    pub exported: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Identified for FitbitData {
    fn id(&self) -> i64 {
        self.id
    }
}
