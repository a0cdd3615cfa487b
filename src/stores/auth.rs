// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: login, logout and sign-in state.

use super::state::StoreState;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::{LoginCredentials, Token, User};
use crate::session::SessionContext;
use std::sync::Arc;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";

pub struct AuthStore {
    client: ApiClient,
    session: Arc<SessionContext>,
    state: StoreState,
}

impl AuthStore {
    pub fn new(client: ApiClient) -> Self {
        let session = client.session().clone();
        Self {
            client,
            session,
            state: StoreState::default(),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Exchange credentials for a bearer token and start a session.
    ///
    /// Returns `None` on failure with `error` set; a rejected password is
    /// reported distinctly from every other failure.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Option<Token> {
        let client = &self.client;
        let session = &self.session;
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let result = self
            .state
            .track_with(describe_login_failure, async move {
                let token: Token = client.post_form("/auth/token", &form).await?;
                session.set_token(&token.access_token)?;
                Ok::<_, ApiError>(token)
            })
            .await;

        match result {
            Ok(token) => {
                tracing::info!(username = %credentials.username, "Logged in");
                Some(token)
            }
            Err(_) => None,
        }
    }

    /// End the session locally. No server call is made.
    pub fn logout(&mut self) {
        self.session.clear();
    }
}

fn describe_login_failure(err: &ApiError) -> String {
    if err.is_unauthorized() {
        INVALID_CREDENTIALS.to_string()
    } else {
        LOGIN_FAILED.to_string()
    }
}
