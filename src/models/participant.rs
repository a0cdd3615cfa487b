// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Study participant model.

use super::Identified;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Participant as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(feature = "binding-generation", ts(export, export_to = "bindings/"))]
pub struct Participant {
    pub id: i64,
    /// Study-assigned participant ID
    pub pid: String,
    /// Name substituted into message templates
    #[serde(default)]
    pub friendly_name: Option<String>,
    pub phone_number: String,
    pub study_group: String,
    /// First day messages may be sent
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// SMS window start (local time of day)
    #[serde(default)]
    pub sms_window_start: Option<NaiveTime>,
    /// SMS window end (local time of day)
    #[serde(default)]
    pub sms_window_end: Option<NaiveTime>,
    /// Minutes from UTC
    #[serde(default)]
    pub timezone_offset: Option<i32>,
    pub active: bool,
    pub fitbit_connected: bool,
    pub fitbit_registration_requested: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Identified for Participant {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Body of `POST /participants/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantCreate {
    pub pid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    pub phone_number: String,
    pub study_group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_window_start: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_window_end: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<i32>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ParticipantCreate {
    /// Minimal participant; everything optional left unset and `active`.
    pub fn new(
        pid: impl Into<String>,
        phone_number: impl Into<String>,
        study_group: impl Into<String>,
    ) -> Self {
        Self {
            pid: pid.into(),
            friendly_name: None,
            phone_number: phone_number.into(),
            study_group: study_group.into(),
            start_date: None,
            sms_window_start: None,
            sms_window_end: None,
            timezone_offset: None,
            active: true,
        }
    }
}

/// Body of `PUT /participants/:id`. Unset fields are left alone by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_window_start: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_window_end: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitbit_connected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitbit_registration_requested: Option<bool>,
}

/// Filters for `GET /participants/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParticipantQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_group: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_from_server_json() {
        let json = serde_json::json!({
            "id": 12,
            "pid": "P012",
            "friendly_name": null,
            "phone_number": "+15555550123",
            "study_group": "control",
            "start_date": "2025-03-01",
            "sms_window_start": "09:00:00",
            "sms_window_end": "17:30:00",
            "timezone_offset": -480,
            "active": true,
            "fitbit_connected": false,
            "fitbit_registration_requested": false,
            "created_at": "2025-02-20T10:11:12.345678",
            "updated_at": "2025-02-20T10:11:12.345678"
        });

        let p: Participant = serde_json::from_value(json).unwrap();
        assert_eq!(p.id(), 12);
        assert_eq!(p.start_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(p.sms_window_end, NaiveTime::from_hms_opt(17, 30, 0));
        assert_eq!(p.timezone_offset, Some(-480));
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = ParticipantUpdate {
            active: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "active": false })
        );
    }
}
