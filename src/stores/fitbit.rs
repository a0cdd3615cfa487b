// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitbit administration store: stored tokens and server-side triggers.

use super::state::StoreState;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{ActionResponse, FitbitAuthRequest, FitbitToken};
use serde::Serialize;

/// Query for `POST /fitbit/fetch-data`; omitting the participant fetches for all.
#[derive(Debug, Default, Serialize)]
struct FetchDataQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    participant_id: Option<i64>,
}

pub struct FitbitStore {
    client: ApiClient,
    tokens: Vec<FitbitToken>,
    state: StoreState,
}

impl FitbitStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            tokens: Vec::new(),
            state: StoreState::default(),
        }
    }

    pub fn tokens(&self) -> &[FitbitToken] {
        &self.tokens
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub async fn fetch_tokens(&mut self) -> &[FitbitToken] {
        let result = self
            .state
            .track(
                "Failed to fetch Fitbit tokens",
                self.client.get::<Vec<FitbitToken>>("/fitbit/tokens"),
            )
            .await;

        match result {
            Ok(tokens) => {
                self.tokens = tokens;
                &self.tokens
            }
            Err(_) => &[],
        }
    }

    pub async fn request_registration(&mut self, participant_id: i64) -> Result<ActionResponse> {
        let path = format!("/fitbit/registration-request/{}", participant_id);
        self.state
            .track(
                "Failed to request Fitbit registration",
                self.client
                    .post::<ActionResponse, _>(&path, &serde_json::json!({})),
            )
            .await
    }

    /// Queue a data pull for one participant, or everyone when `None`.
    /// Id 0 is never assigned by the server and also means everyone.
    pub async fn trigger_data_fetch(
        &mut self,
        participant_id: Option<i64>,
    ) -> Result<ActionResponse> {
        let query = FetchDataQuery {
            participant_id: participant_id.filter(|&id| id != 0),
        };
        self.state
            .track(
                "Failed to trigger Fitbit data fetch",
                self.client.post_with_query::<ActionResponse, _, _>(
                    "/fitbit/fetch-data",
                    &serde_json::json!({}),
                    &query,
                ),
            )
            .await
    }

    /// Register tokens obtained outside the OAuth flow.
    pub async fn create_manual_auth(&mut self, auth: &FitbitAuthRequest) -> Result<ActionResponse> {
        self.state
            .track(
                "Failed to create Fitbit authorization",
                self.client
                    .post::<ActionResponse, _>("/fitbit/auth", auth),
            )
            .await
    }

    /// Export collected data to Dropbox.
    pub async fn export_data(&mut self) -> Result<ActionResponse> {
        self.state
            .track(
                "Failed to export data to Dropbox",
                self.client
                    .post::<ActionResponse, _>("/fitbit/export-to-dropbox", &serde_json::json!({})),
            )
            .await
    }
}
