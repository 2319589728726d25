//! Google Calendar API client implementation.

use async_trait::async_trait;
use google_kit_auth::{resource_url, AuthorizedClient};
use google_kit_core::{CalendarProvider, Event, EventQuery, Result};
use tracing::debug;

use crate::types::EventList;
use crate::{DEFAULT_CALENDAR_URL, PRIMARY_CALENDAR};

/// Google Calendar API client.
#[derive(Clone)]
pub struct CalendarClient {
    base_url: String,
    http: AuthorizedClient,
}

impl CalendarClient {
    /// Create a new Calendar client.
    pub fn new(http: AuthorizedClient) -> Self {
        Self::with_base_url(DEFAULT_CALENDAR_URL, http)
    }

    /// Create a new Calendar client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, http: AuthorizedClient) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/{}/events", self.base_url, PRIMARY_CALENDAR)
    }

    fn event_url(&self, event_id: &str) -> Result<String> {
        resource_url(&self.events_url(), &[event_id])
    }
}

#[async_trait]
impl CalendarProvider for CalendarClient {
    async fn insert_event(&self, event: &Event) -> Result<Event> {
        debug!(summary = ?event.summary, "Creating calendar event");
        self.http.post(&self.events_url(), &[], event).await
    }

    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>> {
        let params = [
            ("showDeleted", "false".to_string()),
            ("singleEvents", "true".to_string()),
            ("timeMin", query.time_min.clone()),
            ("timeMax", query.time_max.clone()),
            ("maxResults", query.max_results.to_string()),
            ("orderBy", "startTime".to_string()),
        ];

        let list: EventList = self.http.get(&self.events_url(), &params).await?;
        debug!(count = list.items.len(), "Listed calendar events");
        Ok(list.items)
    }

    async fn get_event(&self, event_id: &str) -> Result<Event> {
        self.http.get(&self.event_url(event_id)?, &[]).await
    }

    async fn update_event(&self, event_id: &str, event: &Event) -> Result<Event> {
        debug!(event_id = event_id, "Updating calendar event");
        self.http.put(&self.event_url(event_id)?, event).await
    }
}
