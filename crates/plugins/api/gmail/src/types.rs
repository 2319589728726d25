//! Gmail API request and response envelopes.

use google_kit_core::{Filter, Label, MessageRef};
use serde::{Deserialize, Serialize};

/// Response of `messages.list`.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageList {
    #[serde(default)]
    pub messages: Vec<MessageRef>,
}

/// Response of `labels.list`.
#[derive(Debug, Deserialize)]
pub(crate) struct LabelList {
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// Response of `settings.filters.list`. Gmail names the array `filter`.
#[derive(Debug, Deserialize)]
pub(crate) struct FilterList {
    #[serde(default)]
    pub filter: Vec<Filter>,
}

/// Body of `messages.send`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendRequest<'a> {
    pub raw: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<&'a str>,
}
