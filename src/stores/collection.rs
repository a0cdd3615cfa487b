// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic CRUD store over one REST collection.
//!
//! A [`Resource`] names the entity, body and query types plus the
//! collection path; [`RemoteCollection`] mirrors the collection locally and
//! reconciles it with server responses:
//! - fetch replaces the local list wholesale
//! - create appends the server's entity
//! - update replaces the entity with the same `id` (no-op if absent)
//! - delete removes the entity only after the server confirms

use super::state::StoreState;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::Identified;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Store operation, used to pick failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// A REST collection such as `/participants/`.
pub trait Resource {
    type Entity: DeserializeOwned + Clone + Identified;
    type Create: Serialize;
    type Update: Serialize;
    type Query: Serialize;

    /// Collection path including the trailing slash; item paths append the id.
    const PATH: &'static str;

    /// Error text recorded when `op` fails and the server gave no detail.
    fn failure(op: Operation, id: Option<i64>) -> String;
}

/// Local mirror of one remote collection.
pub struct RemoteCollection<R: Resource> {
    client: ApiClient,
    items: Vec<R::Entity>,
    state: StoreState,
}

impl<R: Resource> RemoteCollection<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            state: StoreState::default(),
        }
    }

    pub fn items(&self) -> &[R::Entity] {
        &self.items
    }

    /// Mutable access for store-specific local patches.
    pub fn find_mut(&mut self, id: i64) -> Option<&mut R::Entity> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Split borrow for store-specific operations.
    pub(crate) fn parts(&mut self) -> (&ApiClient, &mut StoreState) {
        (&self.client, &mut self.state)
    }

    pub fn item_path(id: i64) -> String {
        format!("{}{}", R::PATH, id)
    }

    /// Replace the local list with the server's. Failures leave the list
    /// untouched and yield an empty slice.
    pub async fn fetch(&mut self, query: &R::Query) -> &[R::Entity] {
        let fallback = R::failure(Operation::List, None);
        let result = self
            .state
            .track(
                &fallback,
                self.client.get_with_query::<Vec<R::Entity>, _>(R::PATH, query),
            )
            .await;

        match result {
            Ok(items) => {
                self.items = items;
                &self.items
            }
            Err(_) => &[],
        }
    }

    /// Fetch one entity without touching the local list.
    pub async fn get(&mut self, id: i64) -> Option<R::Entity> {
        let fallback = R::failure(Operation::Get, Some(id));
        let path = Self::item_path(id);
        self.state
            .track(&fallback, self.client.get::<R::Entity>(&path))
            .await
            .ok()
    }

    /// Create an entity and append the server's copy.
    pub async fn create(&mut self, body: &R::Create) -> Result<R::Entity> {
        let fallback = R::failure(Operation::Create, None);
        let created = self
            .state
            .track(&fallback, self.client.post::<R::Entity, _>(R::PATH, body))
            .await?;

        self.items.push(created.clone());
        Ok(created)
    }

    /// Update an entity and swap in the server's copy if it is held locally.
    pub async fn update(&mut self, id: i64, body: &R::Update) -> Result<R::Entity> {
        let fallback = R::failure(Operation::Update, Some(id));
        let path = Self::item_path(id);
        let updated = self
            .state
            .track(&fallback, self.client.put::<R::Entity, _>(&path, body))
            .await?;

        replace_by_id(&mut self.items, id, updated.clone());
        Ok(updated)
    }

    /// Delete an entity; the local copy goes only once the server agrees.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        let fallback = R::failure(Operation::Delete, Some(id));
        let path = Self::item_path(id);
        self.state
            .track(&fallback, self.client.delete(&path))
            .await?;

        self.items.retain(|item| item.id() != id);
        Ok(())
    }
}

/// Swap `replacement` in for the entity with `id`. Returns whether one was found.
pub(crate) fn replace_by_id<T: Identified>(items: &mut [T], id: i64, replacement: T) -> bool {
    match items.iter_mut().find(|item| item.id() == id) {
        Some(slot) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}
