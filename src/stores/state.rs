// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Loading/error bookkeeping shared by every store.

use crate::error::{ApiError, Result};
use std::future::Future;

/// Loading flag and last error message of one store.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoreState {
    loading: bool,
    error: Option<String>,
}

/// Sets the loading flag for its lifetime. Resetting on drop covers
/// completion, early return and a dropped (cancelled) future alike.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn new(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

impl StoreState {
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Run one API operation: clear the error, hold loading while `op` runs,
    /// and on failure record the server detail or `fallback`.
    pub async fn track<T, F>(&mut self, fallback: &str, op: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.track_with(|err| err.describe(fallback), op).await
    }

    /// Like [`track`](Self::track) with a custom failure message.
    pub async fn track_with<T, F, D>(&mut self, describe: D, op: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
        D: FnOnce(&ApiError) -> String,
    {
        self.error = None;

        let result = {
            let _loading = LoadingGuard::new(&mut self.loading);
            op.await
        };

        if let Err(err) = &result {
            let message = describe(err);
            tracing::error!(error = %err, "{}", message);
            self.error = Some(message);
        }

        result
    }
}
