// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Participant store.

use super::collection::{Operation, RemoteCollection, Resource};
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{
    ActionResponse, Participant, ParticipantCreate, ParticipantQuery, ParticipantUpdate,
};

/// The `/participants/` collection.
pub struct ParticipantResource;

impl Resource for ParticipantResource {
    type Entity = Participant;
    type Create = ParticipantCreate;
    type Update = ParticipantUpdate;
    type Query = ParticipantQuery;

    const PATH: &'static str = "/participants/";

    fn failure(op: Operation, _id: Option<i64>) -> String {
        match op {
            Operation::List => "Failed to fetch participants",
            Operation::Get => "Failed to fetch participant",
            Operation::Create => "Failed to create participant",
            Operation::Update => "Failed to update participant",
            Operation::Delete => "Failed to delete participant",
        }
        .to_string()
    }
}

pub struct ParticipantStore {
    participants: RemoteCollection<ParticipantResource>,
}

impl ParticipantStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            participants: RemoteCollection::new(client),
        }
    }

    pub fn participants(&self) -> &[Participant] {
        self.participants.items()
    }

    pub fn loading(&self) -> bool {
        self.participants.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.participants.error()
    }

    pub async fn fetch_participants(&mut self, query: &ParticipantQuery) -> &[Participant] {
        self.participants.fetch(query).await
    }

    pub async fn get_participant(&mut self, id: i64) -> Option<Participant> {
        self.participants.get(id).await
    }

    /// Look a participant up by study PID.
    pub async fn get_participant_by_pid(&mut self, pid: &str) -> Option<Participant> {
        let path = format!(
            "{}by-pid/{}",
            ParticipantResource::PATH,
            urlencoding::encode(pid)
        );
        let fallback = ParticipantResource::failure(Operation::Get, None);

        let (client, state) = self.participants.parts();
        state
            .track(&fallback, client.get::<Participant>(&path))
            .await
            .ok()
    }

    pub async fn create_participant(&mut self, body: &ParticipantCreate) -> Result<Participant> {
        self.participants.create(body).await
    }

    pub async fn update_participant(
        &mut self,
        id: i64,
        body: &ParticipantUpdate,
    ) -> Result<Participant> {
        self.participants.update(id, body).await
    }

    pub async fn delete_participant(&mut self, id: i64) -> Result<()> {
        self.participants.delete(id).await
    }

    /// Ask the server to flag a participant for Fitbit registration and
    /// mirror the flag locally.
    pub async fn request_fitbit_registration(&mut self, id: i64) -> Result<ActionResponse> {
        let path = format!("/fitbit/registration-request/{}", id);
        let (client, state) = self.participants.parts();
        let response = state
            .track(
                "Failed to request Fitbit registration",
                client.post::<ActionResponse, _>(&path, &serde_json::json!({})),
            )
            .await?;

        if let Some(participant) = self.participants.find_mut(id) {
            participant.fitbit_registration_requested = true;
        }
        Ok(response)
    }
}
