//! Service traits implemented by the Google API clients.
//!
//! Tool handlers only see these traits, so tests can substitute in-memory
//! fakes for the real HTTP clients.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    ChatMessage, ChatMessagePage, ChatMessageQuery, Event, EventQuery, Filter, Label,
    LabelChange, MemberQuery, Membership, Message, MessageFormat, MessageRef, NewChatMessage,
    Space,
};

/// Source of OAuth2 bearer tokens.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// Return a currently valid access token, refreshing it if needed.
    async fn access_token(&self) -> Result<String>;
}

/// Fixed bearer token, for tests and pre-authorized environments.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl AccessTokenSource for StaticToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Google Calendar operations on the primary calendar.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Create an event.
    async fn insert_event(&self, event: &Event) -> Result<Event>;

    /// List single events ordered by start time.
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>>;

    /// Fetch one event.
    async fn get_event(&self, event_id: &str) -> Result<Event>;

    /// Replace an event with the given representation.
    async fn update_event(&self, event_id: &str, event: &Event) -> Result<Event>;
}

/// Gmail operations for the authenticated user.
#[async_trait]
pub trait GmailProvider: Send + Sync {
    /// Search messages with Gmail query syntax.
    async fn list_messages(&self, query: &str, max_results: u32) -> Result<Vec<MessageRef>>;

    /// Fetch one message.
    async fn get_message(&self, message_id: &str, format: MessageFormat) -> Result<Message>;

    /// Add and remove labels on a message.
    async fn modify_message(&self, message_id: &str, change: &LabelChange) -> Result<()>;

    /// Send a base64url-encoded RFC 822 message, optionally into a thread.
    async fn send_message(&self, raw: &str, thread_id: Option<&str>) -> Result<MessageRef>;

    async fn list_labels(&self) -> Result<Vec<Label>>;

    async fn create_label(&self, label: &Label) -> Result<Label>;

    async fn delete_label(&self, label_id: &str) -> Result<()>;

    async fn list_filters(&self) -> Result<Vec<Filter>>;

    async fn create_filter(&self, filter: &Filter) -> Result<Filter>;

    async fn delete_filter(&self, filter_id: &str) -> Result<()>;
}

/// Google Chat operations.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// List spaces the caller is a member of.
    async fn list_spaces(&self) -> Result<Vec<Space>>;

    /// Post a message into a space.
    async fn create_message(&self, space: &str, message: &NewChatMessage) -> Result<ChatMessage>;

    /// List memberships of a space.
    async fn list_members(&self, space: &str, query: &MemberQuery) -> Result<Vec<Membership>>;

    /// List one page of messages in a space.
    async fn list_messages(&self, space: &str, query: &ChatMessageQuery)
        -> Result<ChatMessagePage>;
}
