// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitbit store: tokens and trigger endpoints.

use serde_json::json;
use study_admin_client::models::FitbitAuthRequest;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod common;
use common::fitbit_token_json;

#[tokio::test]
async fn test_fetch_tokens() {
    let (mut app, server, _storage) = common::signed_in_app().await;

    Mock::given(method("GET"))
        .and(path("/api/fitbit/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            fitbit_token_json(1, 10),
            fitbit_token_json(2, 11),
        ])))
        .mount(&server)
        .await;

    let tokens = app.fitbit.fetch_tokens().await;
    assert_eq!(tokens.len(), 2);
    assert_eq!(app.fitbit.tokens()[1].participant_id, 11);
}

#[tokio::test]
async fn test_trigger_data_fetch_for_one_participant() {
    let (mut app, server, _storage) = common::signed_in_app().await;

    Mock::given(method("POST"))
        .and(path("/api/fitbit/fetch-data"))
        .and(query_param("participant_id", "10"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "message": "Fitbit data fetch triggered for participant 10"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app
        .fitbit
        .trigger_data_fetch(Some(10))
        .await
        .expect("trigger should succeed");

    assert_eq!(
        response.message.as_deref(),
        Some("Fitbit data fetch triggered for participant 10")
    );
}

#[tokio::test]
async fn test_trigger_data_fetch_for_everyone_sends_no_query() {
    let (mut app, server, _storage) = common::signed_in_app().await;

    Mock::given(method("POST"))
        .and(path("/api/fitbit/fetch-data"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "message": "Fitbit data fetch triggered for all participants"
        })))
        .mount(&server)
        .await;

    app.fitbit
        .trigger_data_fetch(None)
        .await
        .expect("trigger should succeed");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_trigger_data_fetch_zero_id_means_everyone() {
    let (mut app, server, _storage) = common::signed_in_app().await;

    Mock::given(method("POST"))
        .and(path("/api/fitbit/fetch-data"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "message": "Fitbit data fetch triggered for all participants"
        })))
        .mount(&server)
        .await;

    app.fitbit
        .trigger_data_fetch(Some(0))
        .await
        .expect("trigger should succeed");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_create_manual_auth() {
    let (mut app, server, _storage) = common::signed_in_app().await;

    Mock::given(method("POST"))
        .and(path("/api/fitbit/auth"))
        .and(body_json(json!({
            "participant_id": 10,
            "access_token": "a",
            "refresh_token": "r",
            "expires_at": "2025-04-01T00:00:00"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Fitbit auth created for participant 10"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = FitbitAuthRequest {
        participant_id: 10,
        access_token: "a".to_string(),
        refresh_token: "r".to_string(),
        expires_at: "2025-04-01T00:00:00".to_string(),
    };
    app.fitbit
        .create_manual_auth(&auth)
        .await
        .expect("manual auth should succeed");
}

#[tokio::test]
async fn test_export_failure_uses_fallback() {
    let (mut app, server, _storage) = common::signed_in_app().await;

    Mock::given(method("POST"))
        .and(path("/api/fitbit/export-to-dropbox"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": [] })))
        .mount(&server)
        .await;

    let result = app.fitbit.export_data().await;

    assert!(result.is_err());
    assert_eq!(
        app.fitbit.error(),
        Some("Failed to export data to Dropbox")
    );
    assert!(!app.fitbit.loading());
}

#[tokio::test]
async fn test_request_registration_unknown_participant() {
    let (mut app, server, _storage) = common::signed_in_app().await;

    Mock::given(method("POST"))
        .and(path("/api/fitbit/registration-request/77"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Participant with ID 77 not found"
        })))
        .mount(&server)
        .await;

    let err = app
        .fitbit
        .request_registration(77)
        .await
        .expect_err("request should fail");

    assert_eq!(err.status(), Some(404));
    assert_eq!(
        app.fitbit.error(),
        Some("Participant with ID 77 not found")
    );
}
