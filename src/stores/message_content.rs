// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Message-content (template) store.

use super::collection::{Operation, RemoteCollection, Resource};
use crate::error::Result;
use crate::http::ApiClient;
use crate::models::{MessageContent, MessageContentCreate, MessageContentQuery, MessageContentUpdate};

/// The `/message-content/` collection.
pub struct MessageContentResource;

impl Resource for MessageContentResource {
    type Entity = MessageContent;
    type Create = MessageContentCreate;
    type Update = MessageContentUpdate;
    type Query = MessageContentQuery;

    const PATH: &'static str = "/message-content/";

    fn failure(op: Operation, id: Option<i64>) -> String {
        let verb = match op {
            Operation::List => return "Failed to fetch message contents".to_string(),
            Operation::Create => return "Failed to create message content".to_string(),
            Operation::Get => "fetch",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        match id {
            Some(id) => format!("Failed to {} message content #{}", verb, id),
            None => format!("Failed to {} message content", verb),
        }
    }
}

pub struct MessageContentStore {
    contents: RemoteCollection<MessageContentResource>,
    unique_buckets: Vec<String>,
}

impl MessageContentStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            contents: RemoteCollection::new(client),
            unique_buckets: Vec::new(),
        }
    }

    pub fn message_contents(&self) -> &[MessageContent] {
        self.contents.items()
    }

    pub fn unique_buckets(&self) -> &[String] {
        &self.unique_buckets
    }

    pub fn loading(&self) -> bool {
        self.contents.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.contents.error()
    }

    pub async fn fetch_message_contents(
        &mut self,
        query: &MessageContentQuery,
    ) -> &[MessageContent] {
        self.contents.fetch(query).await
    }

    pub async fn get_message_content(&mut self, id: i64) -> Option<MessageContent> {
        self.contents.get(id).await
    }

    pub async fn create_message_content(
        &mut self,
        body: &MessageContentCreate,
    ) -> Result<MessageContent> {
        self.contents.create(body).await
    }

    pub async fn update_message_content(
        &mut self,
        id: i64,
        body: &MessageContentUpdate,
    ) -> Result<MessageContent> {
        self.contents.update(id, body).await
    }

    pub async fn delete_message_content(&mut self, id: i64) -> Result<()> {
        self.contents.delete(id).await
    }

    /// Distinct bucket names across all templates.
    pub async fn fetch_unique_buckets(&mut self) -> &[String] {
        let (client, state) = self.contents.parts();
        let result = state
            .track(
                "Failed to fetch bucket names",
                client.get::<Vec<String>>("/message-content/buckets/unique"),
            )
            .await;

        match result {
            Ok(buckets) => {
                self.unique_buckets = buckets;
                &self.unique_buckets
            }
            Err(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages_name_the_item() {
        assert_eq!(
            MessageContentResource::failure(Operation::Update, Some(5)),
            "Failed to update message content #5"
        );
        assert_eq!(
            MessageContentResource::failure(Operation::List, None),
            "Failed to fetch message contents"
        );
        assert_eq!(
            MessageContentResource::failure(Operation::Create, None),
            "Failed to create message content"
        );
    }
}
