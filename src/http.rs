// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the study administration API.
//!
//! Handles:
//! - Base URL joining
//! - Bearer token injection from the session
//! - 401 interception (session teardown + unauthorized handler)
//! - Error body `detail` extraction

use crate::config::Config;
use crate::error::{extract_detail, ApiError, Result};
use crate::session::SessionContext;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Called after a 401 response has cleared the session.
pub trait UnauthorizedHandler: Send + Sync {
    fn on_unauthorized(&self);
}

/// API client. Clones share the connection pool, session and handler.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionContext>,
    on_unauthorized: Option<Arc<dyn UnauthorizedHandler>>,
}

impl ApiClient {
    /// Create a client for the configured API using `session` for credentials.
    pub fn new(config: &Config, session: Arc<SessionContext>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("study-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
            on_unauthorized: None,
        })
    }

    /// Install the handler run on every 401, typically the router.
    pub fn with_unauthorized_handler(mut self, handler: Arc<dyn UnauthorizedHandler>) -> Self {
        self.on_unauthorized = Some(handler);
        self
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .execute(self.request(Method::GET, path).query(query))
            .await?;
        decode(response).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        decode(response).await
    }

    pub async fn post_with_query<T, B, Q>(&self, path: &str, body: &B, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        let response = self
            .execute(self.request(Method::POST, path).json(body).query(query))
            .await?;
        decode(response).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .execute(self.request(Method::POST, path).form(form))
            .await?;
        decode(response).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .execute(self.request(Method::PUT, path).json(body))
            .await?;
        decode(response).await
    }

    /// DELETE a resource. The response body (usually empty) is ignored.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Build a request and attach the session bearer token, if any.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, url = %url, "API request");

        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and turn non-2xx responses into errors.
    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body);

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path = %url, "API rejected session (401), signing out");
            self.session.clear();
            if let Some(handler) = &self.on_unauthorized {
                handler.on_unauthorized();
            }
            return Err(ApiError::Unauthorized { detail });
        }

        tracing::warn!(path = %url, status = status.as_u16(), detail = ?detail, "API request failed");
        Err(ApiError::Http {
            status: status.as_u16(),
            detail,
        })
    }
}

/// Parse a successful response body as JSON.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(format!("JSON parse error: {}", e)))
}
