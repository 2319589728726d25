//! Google Chat API client implementation.

use async_trait::async_trait;
use google_kit_auth::{resource_url, AuthorizedClient};
use google_kit_core::{
    ChatMessage, ChatMessagePage, ChatMessageQuery, ChatProvider, Error, MemberQuery, Membership,
    NewChatMessage, Result, Space, Thread,
};
use tracing::debug;

use crate::types::{CreateMessageRequest, MembershipList, SpaceList};
use crate::{DEFAULT_CHAT_URL, REPLY_FALLBACK_TO_NEW_THREAD};

/// Google Chat API client.
#[derive(Clone)]
pub struct ChatClient {
    base_url: String,
    http: AuthorizedClient,
}

impl ChatClient {
    /// Create a new Chat client.
    pub fn new(http: AuthorizedClient) -> Self {
        Self::with_base_url(DEFAULT_CHAT_URL, http)
    }

    /// Create a new Chat client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, http: AuthorizedClient) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// URL below a space resource name such as `spaces/AAAA`.
    fn space_url(&self, space: &str, collection: &str) -> Result<String> {
        resource_url(&self.base_url, &["spaces", space_id(space)?, collection])
    }
}

/// The `<id>` of a `spaces/<id>` resource name.
fn space_id(space: &str) -> Result<&str> {
    match space.trim_matches('/').split_once('/') {
        Some(("spaces", id)) if !id.is_empty() && !id.contains(['/', '?', '#']) => Ok(id),
        _ => Err(Error::invalid_argument(format!(
            "invalid space name {:?}: expected spaces/<id>",
            space
        ))),
    }
}

#[async_trait]
impl ChatProvider for ChatClient {
    async fn list_spaces(&self) -> Result<Vec<Space>> {
        let url = format!("{}/spaces", self.base_url);
        let list: SpaceList = self.http.get(&url, &[]).await?;
        debug!(count = list.spaces.len(), "Listed chat spaces");
        Ok(list.spaces)
    }

    async fn create_message(&self, space: &str, message: &NewChatMessage) -> Result<ChatMessage> {
        let mut params = Vec::new();
        let thread = message.thread_name.as_ref().map(|name| {
            params.push(("messageReplyOption", REPLY_FALLBACK_TO_NEW_THREAD.to_string()));
            Thread {
                name: Some(name.clone()),
                thread_key: None,
            }
        });

        let body = CreateMessageRequest {
            text: &message.text,
            formatted_text: message.formatted_text.as_deref(),
            thread,
        };

        debug!(space = space, threaded = body.thread.is_some(), "Sending chat message");
        self.http
            .post(&self.space_url(space, "messages")?, &params, &body)
            .await
    }

    async fn list_members(&self, space: &str, query: &MemberQuery) -> Result<Vec<Membership>> {
        let mut params = vec![("pageSize", query.page_size.to_string())];
        if let Some(filter) = &query.filter {
            params.push(("filter", filter.clone()));
        }

        let list: MembershipList = self
            .http
            .get(&self.space_url(space, "members")?, &params)
            .await?;
        Ok(list.memberships)
    }

    async fn list_messages(
        &self,
        space: &str,
        query: &ChatMessageQuery,
    ) -> Result<ChatMessagePage> {
        let mut params = vec![("pageSize", query.page_size.to_string())];
        if let Some(token) = &query.page_token {
            params.push(("pageToken", token.clone()));
        }
        if let Some(order_by) = &query.order_by {
            params.push(("orderBy", order_by.clone()));
        }

        self.http
            .get(&self.space_url(space, "messages")?, &params)
            .await
    }
}
