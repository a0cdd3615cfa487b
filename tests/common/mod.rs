// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde_json::{json, Value};
use study_admin_client::config::Config;
use study_admin_client::storage::MemoryTokenStorage;
use study_admin_client::AppState;
use wiremock::MockServer;

/// Token the test app starts with when signed in.
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-access-token";

/// Config pointing at the mock server's `/api`.
pub fn test_config(server: &MockServer) -> Config {
    Config {
        api_base_url: format!("{}/api", server.uri()),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

/// Create a signed-in test app against a fresh mock server.
/// Returns the app, the server and a handle on the token storage.
#[allow(dead_code)]
pub async fn signed_in_app() -> (AppState, MockServer, MemoryTokenStorage) {
    let server = MockServer::start().await;
    let storage = MemoryTokenStorage::with_token(TEST_TOKEN);
    let app = AppState::with_storage(test_config(&server), storage.clone())
        .expect("Failed to build test app");
    (app, server, storage)
}

/// Create a signed-out test app against a fresh mock server.
#[allow(dead_code)]
pub async fn signed_out_app() -> (AppState, MockServer, MemoryTokenStorage) {
    let server = MockServer::start().await;
    let storage = MemoryTokenStorage::new();
    let app = AppState::with_storage(test_config(&server), storage.clone())
        .expect("Failed to build test app");
    (app, server, storage)
}

#[allow(dead_code)]
pub fn participant_json(id: i64, pid: &str) -> Value {
    json!({
        "id": id,
        "pid": pid,
        "friendly_name": null,
        "phone_number": "+15555550100",
        "study_group": "intervention",
        "start_date": "2025-03-01",
        "sms_window_start": "09:00:00",
        "sms_window_end": "20:00:00",
        "timezone_offset": 0,
        "active": true,
        "fitbit_connected": false,
        "fitbit_registration_requested": false,
        "created_at": "2025-02-28T12:00:00",
        "updated_at": "2025-02-28T12:00:00"
    })
}

#[allow(dead_code)]
pub fn message_content_json(id: i64, bucket: &str, active: bool) -> Value {
    json!({
        "id": id,
        "content": format!("Template {} for %F", id),
        "bucket": bucket,
        "active": active,
        "created_at": "2025-02-28T12:00:00",
        "updated_at": "2025-02-28T12:00:00"
    })
}

#[allow(dead_code)]
pub fn message_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "participant_id": 1,
        "content_id": 4,
        "content": "Good morning!",
        "bucket": "morning",
        "status": status,
        "sent_datetime": "2025-03-02T09:00:00",
        "delivered_datetime": null,
        "sid": format!("SM{:04}", id),
        "error_message": null,
        "created_at": "2025-03-02T09:00:00",
        "updated_at": "2025-03-02T09:00:00"
    })
}

#[allow(dead_code)]
pub fn fitbit_token_json(id: i64, participant_id: i64) -> Value {
    json!({
        "id": id,
        "participant_id": participant_id,
        "access_token": "fitbit-access",
        "refresh_token": "fitbit-refresh",
        "expires_at": "2025-03-10T00:00:00",
        "created_at": "2025-03-01T00:00:00",
        "updated_at": "2025-03-01T00:00:00"
    })
}
