// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SMS messages and message-content templates.

use super::Identified;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A sent (or attempted) SMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct Message {
    pub id: i64,
    pub participant_id: i64,
    /// Template the text was drawn from
    #[serde(default)]
    pub content_id: Option<i64>,
    pub content: String,
    pub bucket: String,
    /// sent, delivered, failed, undelivered, queued, ...
    pub status: String,
    pub sent_datetime: String,
    #[serde(default)]
    pub delivered_datetime: Option<String>,
    /// Carrier message identifier
    #[serde(default, alias = "sid")]
    pub twilio_sid: Option<String>,
    #[serde(default, alias = "error_message")]
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Identified for Message {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Message template grouped by bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct MessageContent {
    pub id: i64,
    pub content: String,
    pub bucket: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Identified for MessageContent {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContentCreate {
    pub content: String,
    pub bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageContentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Filters for `GET /message-content/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageContentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Filters for `GET /sms/history`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Filters for `GET /sms/stats`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageStatsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Counts keyed by delivery status, plus the server-added
/// `distinct_participants` and `total_messages` aggregates.
pub type MessageStats = BTreeMap<String, i64>;

/// Which end of an SMS window a [`SmsWindowTime`] counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowBoundary {
    Start,
    End,
}

/// Number of participants sharing one window start or end time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsWindowTime {
    /// `HH:MM`, absent for participants without a window
    pub time: Option<String>,
    pub count: u32,
    #[serde(rename = "type")]
    pub boundary: WindowBoundary,
}
