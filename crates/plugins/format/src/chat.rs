//! JSON projections of Chat resources.
//!
//! Output is pretty-printed with two-space indentation. Optional fields the
//! API omitted render as empty strings, nested objects as `null`.

use google_kit_core::{
    ChatAttachment, ChatMessage, ChatMessagePage, ChatUser, Membership, Result, Space,
};
use serde_json::{json, Value};

fn user_entry(user: &ChatUser) -> Value {
    json!({
        "name": user.name.clone().unwrap_or_default(),
        "displayName": user.display_name.clone().unwrap_or_default(),
        "type": user.user_type.clone().unwrap_or_default(),
    })
}

fn attachment_entry(attachment: &ChatAttachment) -> Value {
    json!({
        "name": attachment.name,
        "contentName": attachment.content_name,
        "contentType": attachment.content_type,
        "source": attachment.source,
        "thumbnailUri": attachment.thumbnail_uri,
        "downloadUri": attachment.download_uri,
    })
}

fn message_entry(message: &ChatMessage) -> Result<Value> {
    let mut entry = json!({
        "name": message.name,
        "sender": serde_json::to_value(&message.sender)?,
        "createTime": message.create_time.clone().unwrap_or_default(),
        "text": message.text.clone().unwrap_or_default(),
        "thread": serde_json::to_value(&message.thread)?,
    });

    if !message.attachment.is_empty() {
        let attachments: Vec<Value> = message.attachment.iter().map(attachment_entry).collect();
        entry["attachments"] = Value::Array(attachments);
    }

    Ok(entry)
}

/// Render `gchat_list_spaces` as an array of `{name, displayName, type}`.
pub fn spaces_to_json(spaces: &[Space]) -> Result<String> {
    let entries: Vec<Value> = spaces
        .iter()
        .map(|space| {
            json!({
                "name": space.name,
                "displayName": space.display_name.clone().unwrap_or_default(),
                "type": space.space_type.clone().unwrap_or_default(),
            })
        })
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Render `gchat_list_users`. Memberships without a member are skipped.
pub fn members_to_json(memberships: &[Membership]) -> Result<String> {
    let entries: Vec<Value> = memberships
        .iter()
        .filter_map(|m| m.member.as_ref())
        .map(user_entry)
        .collect();

    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Render `gchat_list_messages` as `{messages, nextPageToken}`.
pub fn messages_to_json(page: &ChatMessagePage) -> Result<String> {
    let messages = page
        .messages
        .iter()
        .map(message_entry)
        .collect::<Result<Vec<_>>>()?;

    let output = json!({
        "messages": messages,
        "nextPageToken": page.next_page_token,
    });

    Ok(serde_json::to_string_pretty(&output)?)
}
