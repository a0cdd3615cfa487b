// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Study-Admin: client for the research-study administration API
//!
//! This crate provides typed access to participant tracking, SMS message
//! content and history, and Fitbit/Dropbox administration, with session
//! handling and an authentication-guarded router.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod router;
pub mod session;
pub mod storage;
pub mod stores;

use config::Config;
use error::Result;
use http::ApiClient;
use router::Router;
use session::SessionContext;
use std::sync::Arc;
use storage::{FileTokenStorage, TokenStorage};
use stores::{AuthStore, FitbitStore, MessageContentStore, MessagesStore, ParticipantStore};

/// Client application state: one session, router and API client, and a
/// store per resource.
pub struct AppState {
    pub config: Config,
    pub session: Arc<SessionContext>,
    pub router: Arc<Router>,
    pub client: ApiClient,
    pub auth: AuthStore,
    pub participants: ParticipantStore,
    pub message_content: MessageContentStore,
    pub messages: MessagesStore,
    pub fitbit: FitbitStore,
}

impl AppState {
    /// Build the application with the token file named in `config`.
    pub fn bootstrap(config: Config) -> Result<Self> {
        let storage = FileTokenStorage::new(config.token_path.clone());
        Self::with_storage(config, storage)
    }

    /// Build the application over any token storage.
    pub fn with_storage(config: Config, storage: impl TokenStorage + 'static) -> Result<Self> {
        let session = Arc::new(SessionContext::restore(storage)?);
        let router = Arc::new(Router::new(session.clone()));
        let client =
            ApiClient::new(&config, session.clone())?.with_unauthorized_handler(router.clone());

        Ok(Self {
            auth: AuthStore::new(client.clone()),
            participants: ParticipantStore::new(client.clone()),
            message_content: MessageContentStore::new(client.clone()),
            messages: MessagesStore::new(client.clone()),
            fitbit: FitbitStore::new(client.clone()),
            config,
            session,
            router,
            client,
        })
    }
}
