// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SMS history store.

use super::collection::replace_by_id;
use super::state::StoreState;
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{Message, MessageQuery, MessageStats, MessageStatsQuery, SmsWindowTime};

/// Page size the server applies when the query sets no `limit`.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Estimate the total number of messages matching a history query.
///
/// The history endpoint does not report a total. A full page means there is
/// at least one more row, so the estimate is one past what has been seen;
/// a short page means the end was reached. This undercounts whenever more
/// than one further row exists.
pub fn estimate_total_count(skip: Option<u32>, limit: Option<u32>, returned: usize) -> u64 {
    let skip = u64::from(skip.unwrap_or(0));
    // A zero limit means "unset", as it does to the server
    let limit = limit.filter(|&l| l > 0).unwrap_or(DEFAULT_PAGE_LIMIT) as usize;
    let seen = skip + returned as u64;

    if returned >= limit {
        seen + 1
    } else {
        seen
    }
}

pub struct MessagesStore {
    client: ApiClient,
    messages: Vec<Message>,
    total_count: u64,
    stats: MessageStats,
    state: StoreState,
}

impl MessagesStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            messages: Vec::new(),
            total_count: 0,
            stats: MessageStats::new(),
            state: StoreState::default(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Estimated size of the last history query; see [`estimate_total_count`].
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn stats(&self) -> &MessageStats {
        &self.stats
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Load one page of message history (newest first).
    pub async fn fetch_messages(&mut self, query: &MessageQuery) -> &[Message] {
        let result = self
            .state
            .track(
                "Failed to fetch message history",
                self.client
                    .get_with_query::<Vec<Message>, _>("/sms/history", query),
            )
            .await;

        match result {
            Ok(messages) => {
                self.total_count = estimate_total_count(query.skip, query.limit, messages.len());
                self.messages = messages;
                &self.messages
            }
            Err(_) => &[],
        }
    }

    /// Delivery statistics; an empty map on failure.
    pub async fn fetch_message_stats(&mut self, query: &MessageStatsQuery) -> MessageStats {
        let result = self
            .state
            .track(
                "Failed to fetch message statistics",
                self.client
                    .get_with_query::<MessageStats, _>("/sms/stats", query),
            )
            .await;

        match result {
            Ok(stats) => {
                self.stats = stats.clone();
                stats
            }
            Err(_) => MessageStats::new(),
        }
    }

    /// SMS window start/end times in use, with participant counts.
    pub async fn fetch_sms_window_times(&mut self) -> Vec<SmsWindowTime> {
        self.state
            .track(
                "Failed to fetch SMS window times",
                self.client.get::<Vec<SmsWindowTime>>("/sms/window-times"),
            )
            .await
            .unwrap_or_default()
    }

    /// Resend a failed or undelivered message.
    pub async fn resend_message(&mut self, id: i64) -> Result<Message> {
        let path = format!("/sms/resend/{}", id);
        let message = self
            .state
            .track(
                "Failed to resend message",
                self.client
                    .post::<Message, _>(&path, &serde_json::json!({})),
            )
            .await?;

        replace_by_id(&mut self.messages, id, message.clone());
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_full_default_page() {
        assert_eq!(estimate_total_count(None, None, 100), 101);
    }

    #[test]
    fn test_estimate_short_page() {
        assert_eq!(estimate_total_count(None, None, 42), 42);
        assert_eq!(estimate_total_count(Some(40), Some(20), 7), 47);
    }

    #[test]
    fn test_estimate_full_page_with_offset() {
        assert_eq!(estimate_total_count(Some(40), Some(20), 20), 61);
    }

    #[test]
    fn test_estimate_empty() {
        assert_eq!(estimate_total_count(Some(0), Some(10), 0), 0);
    }
}
