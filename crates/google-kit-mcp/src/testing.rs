//! Test doubles for the service traits.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use google_kit_core::{
    CalendarProvider, ChatMessage, ChatMessagePage, ChatMessageQuery, ChatProvider, Error, Event,
    EventQuery, Filter, GmailProvider, Header, Label, LabelChange, MemberQuery, Membership,
    Message, MessageFormat, MessagePart, MessageRef, NewChatMessage, Result, Space,
};
use mockall::mock;

mock! {
    pub Calendar {}

    #[async_trait]
    impl CalendarProvider for Calendar {
        async fn insert_event(&self, event: &Event) -> Result<Event>;
        async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>>;
        async fn get_event(&self, event_id: &str) -> Result<Event>;
        async fn update_event(&self, event_id: &str, event: &Event) -> Result<Event>;
    }
}

mock! {
    pub Chat {}

    #[async_trait]
    impl ChatProvider for Chat {
        async fn list_spaces(&self) -> Result<Vec<Space>>;
        async fn create_message(&self, space: &str, message: &NewChatMessage) -> Result<ChatMessage>;
        async fn list_members(&self, space: &str, query: &MemberQuery) -> Result<Vec<Membership>>;
        async fn list_messages(&self, space: &str, query: &ChatMessageQuery) -> Result<ChatMessagePage>;
    }
}

/// In-memory mailbox that records every mutation.
#[derive(Default)]
pub(crate) struct FakeGmail {
    pub messages: HashMap<String, Message>,
    pub labels: Mutex<Vec<Label>>,
    pub filters: Mutex<Vec<Filter>>,
    pub modified: Mutex<Vec<(String, LabelChange)>>,
    pub sent: Mutex<Vec<(String, Option<String>)>>,
    pub fetched_formats: Mutex<Vec<MessageFormat>>,
}

impl FakeGmail {
    pub fn with_message(mut self, id: &str, headers: &[(&str, &str)]) -> Self {
        let message = Message {
            id: id.to_string(),
            thread_id: Some(format!("thread-{}", id)),
            snippet: format!("snippet {}", id),
            payload: Some(MessagePart {
                headers: headers.iter().map(|(n, v)| Header::new(*n, *v)).collect(),
                ..Default::default()
            }),
            ..Default::default()
        };
        self.messages.insert(id.to_string(), message);
        self
    }

    pub fn with_label(self, id: &str, name: &str) -> Self {
        self.labels.lock().unwrap().push(Label {
            id: id.to_string(),
            name: name.to_string(),
            label_type: Some("user".to_string()),
            ..Default::default()
        });
        self
    }

    pub fn sent_raw(&self) -> Vec<(String, Option<String>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl GmailProvider for FakeGmail {
    async fn list_messages(&self, _query: &str, max_results: u32) -> Result<Vec<MessageRef>> {
        let mut ids: Vec<_> = self.messages.keys().cloned().collect();
        ids.sort();
        // "ghost" is a hit that can no longer be fetched.
        ids.push("ghost".to_string());
        Ok(ids
            .into_iter()
            .take(max_results as usize)
            .map(|id| MessageRef {
                id,
                thread_id: None,
            })
            .collect())
    }

    async fn get_message(&self, message_id: &str, format: MessageFormat) -> Result<Message> {
        self.fetched_formats.lock().unwrap().push(format);
        self.messages
            .get(message_id)
            .cloned()
            .ok_or_else(|| Error::from_status(404, "Requested entity was not found."))
    }

    async fn modify_message(&self, message_id: &str, change: &LabelChange) -> Result<()> {
        if message_id == "locked" {
            return Err(Error::from_status(400, "Invalid label"));
        }
        self.modified
            .lock()
            .unwrap()
            .push((message_id.to_string(), change.clone()));
        Ok(())
    }

    async fn send_message(&self, raw: &str, thread_id: Option<&str>) -> Result<MessageRef> {
        self.sent
            .lock()
            .unwrap()
            .push((raw.to_string(), thread_id.map(str::to_string)));
        Ok(MessageRef {
            id: "sent1".to_string(),
            thread_id: thread_id.map(str::to_string),
        })
    }

    async fn list_labels(&self) -> Result<Vec<Label>> {
        Ok(self.labels.lock().unwrap().clone())
    }

    async fn create_label(&self, label: &Label) -> Result<Label> {
        let mut labels = self.labels.lock().unwrap();
        let created = Label {
            id: format!("Label_{}", labels.len() + 1),
            label_type: Some("user".to_string()),
            ..label.clone()
        };
        labels.push(created.clone());
        Ok(created)
    }

    async fn delete_label(&self, label_id: &str) -> Result<()> {
        let mut labels = self.labels.lock().unwrap();
        let before = labels.len();
        labels.retain(|l| l.id != label_id);
        if labels.len() == before {
            return Err(Error::from_status(404, "Label not found"));
        }
        Ok(())
    }

    async fn list_filters(&self) -> Result<Vec<Filter>> {
        Ok(self.filters.lock().unwrap().clone())
    }

    async fn create_filter(&self, filter: &Filter) -> Result<Filter> {
        let mut filters = self.filters.lock().unwrap();
        let created = Filter {
            id: Some(format!("filter{}", filters.len() + 1)),
            ..filter.clone()
        };
        filters.push(created.clone());
        Ok(created)
    }

    async fn delete_filter(&self, _filter_id: &str) -> Result<()> {
        Ok(())
    }
}
