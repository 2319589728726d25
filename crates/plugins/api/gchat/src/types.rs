//! Chat API request and response envelopes.

use google_kit_core::{Membership, Space, Thread};
use serde::{Deserialize, Serialize};

/// Response of `spaces.list`.
#[derive(Debug, Deserialize)]
pub(crate) struct SpaceList {
    #[serde(default)]
    pub spaces: Vec<Space>,
}

/// Response of `spaces.members.list`.
#[derive(Debug, Deserialize)]
pub(crate) struct MembershipList {
    #[serde(default)]
    pub memberships: Vec<Membership>,
}

/// Body of `spaces.messages.create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateMessageRequest<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
}
