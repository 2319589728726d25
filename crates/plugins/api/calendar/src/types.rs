//! Calendar API response envelopes.

use google_kit_core::Event;
use serde::Deserialize;

/// Response of `events.list`.
#[derive(Debug, Deserialize)]
pub(crate) struct EventList {
    #[serde(default)]
    pub items: Vec<Event>,
}
