//! Gmail API client implementation.

use async_trait::async_trait;
use google_kit_auth::{resource_url, AuthorizedClient};
use google_kit_core::{
    Filter, GmailProvider, Label, LabelChange, Message, MessageFormat, MessageRef, Result,
};
use tracing::debug;

use crate::types::{FilterList, LabelList, MessageList, SendRequest};
use crate::{CURRENT_USER, DEFAULT_GMAIL_URL};

/// Gmail API client.
#[derive(Clone)]
pub struct GmailClient {
    base_url: String,
    http: AuthorizedClient,
}

impl GmailClient {
    /// Create a new Gmail client.
    pub fn new(http: AuthorizedClient) -> Self {
        Self::with_base_url(DEFAULT_GMAIL_URL, http)
    }

    /// Create a new Gmail client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, http: AuthorizedClient) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// URL of a resource below the current user, one escaped segment per part.
    fn user_url(&self, segments: &[&str]) -> Result<String> {
        resource_url(&format!("{}/users/{}", self.base_url, CURRENT_USER), segments)
    }
}

/// Query parameters for `messages.get`. Metadata headers repeat the key.
fn format_params(format: &MessageFormat) -> Vec<(&'static str, String)> {
    let mut params = vec![("format", format.as_str().to_string())];
    if let MessageFormat::Metadata(headers) = format {
        params.extend(headers.iter().map(|h| ("metadataHeaders", h.clone())));
    }
    params
}

#[async_trait]
impl GmailProvider for GmailClient {
    async fn list_messages(&self, query: &str, max_results: u32) -> Result<Vec<MessageRef>> {
        let params = [
            ("q", query.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        let list: MessageList = self.http.get(&self.user_url(&["messages"])?, &params).await?;
        debug!(count = list.messages.len(), "Listed Gmail messages");
        Ok(list.messages)
    }

    async fn get_message(&self, message_id: &str, format: MessageFormat) -> Result<Message> {
        let url = self.user_url(&["messages", message_id])?;
        self.http.get(&url, &format_params(&format)).await
    }

    async fn modify_message(&self, message_id: &str, change: &LabelChange) -> Result<()> {
        let url = self.user_url(&["messages", message_id, "modify"])?;
        let _: serde_json::Value = self.http.post(&url, &[], change).await?;
        Ok(())
    }

    async fn send_message(&self, raw: &str, thread_id: Option<&str>) -> Result<MessageRef> {
        debug!(thread_id = ?thread_id, "Sending Gmail message");
        let body = SendRequest { raw, thread_id };
        self.http
            .post(&self.user_url(&["messages", "send"])?, &[], &body)
            .await
    }

    async fn list_labels(&self) -> Result<Vec<Label>> {
        let list: LabelList = self.http.get(&self.user_url(&["labels"])?, &[]).await?;
        Ok(list.labels)
    }

    async fn create_label(&self, label: &Label) -> Result<Label> {
        debug!(name = %label.name, "Creating Gmail label");
        self.http.post(&self.user_url(&["labels"])?, &[], label).await
    }

    async fn delete_label(&self, label_id: &str) -> Result<()> {
        self.http
            .delete(&self.user_url(&["labels", label_id])?)
            .await
    }

    async fn list_filters(&self) -> Result<Vec<Filter>> {
        let list: FilterList = self
            .http
            .get(&self.user_url(&["settings", "filters"])?, &[])
            .await?;
        Ok(list.filter)
    }

    async fn create_filter(&self, filter: &Filter) -> Result<Filter> {
        self.http
            .post(&self.user_url(&["settings", "filters"])?, &[], filter)
            .await
    }

    async fn delete_filter(&self, filter_id: &str) -> Result<()> {
        self.http
            .delete(&self.user_url(&["settings", "filters", filter_id])?)
            .await
    }
}
