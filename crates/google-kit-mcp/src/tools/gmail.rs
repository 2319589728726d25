//! Gmail tools.

use google_kit_core::{
    Error, Filter, FilterAction, FilterCriteria, GmailProvider, Label, LabelChange,
    MessageFormat, Result,
};
use google_kit_format::gmail::{
    filters_to_text, labels_to_text, message_to_text, search_results_to_text,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{failed, ToolSpec};
use crate::params::{self, comma_list, non_empty, present};
use crate::protocol::ToolDefinition;
use crate::reply::{Reply, REPLY_SOURCE_HEADERS};

/// Maximum number of messages returned by `gmail_search`.
const SEARCH_LIMIT: u32 = 10;

/// Headers fetched for each search hit.
const SEARCH_HEADERS: [&str; 3] = ["From", "Subject", "Date"];

const SPAM: &str = "SPAM";
const IMPORTANT: &str = "IMPORTANT";
const UNREAD: &str = "UNREAD";
const INBOX: &str = "INBOX";

pub(crate) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolSpec::new("gmail_search", "Search emails in Gmail using Gmail's search syntax")
            .required_string("query", "Gmail search query. Follow Gmail's search syntax")
            .build(),
        ToolSpec::new(
            "gmail_read_email",
            "Read a specific email's full content including headers and body",
        )
        .required_string("message_id", "ID of the email message to read")
        .boolean("include_attachments", "Whether to include attachment information")
        .build(),
        ToolSpec::new("gmail_reply_email", "Reply to a specific email")
            .required_string("message_id", "ID of the email message to reply to")
            .required_string("reply_text", "Text content of the reply")
            .boolean("reply_all", "Whether to reply to all recipients")
            .build(),
        ToolSpec::new(
            "gmail_move_to_spam",
            "Move specific emails to spam folder in Gmail by message IDs",
        )
        .required_string(
            "message_ids",
            "Comma-separated list of message IDs to move to spam",
        )
        .build(),
        ToolSpec::new(
            "gmail_create_filter",
            "Create a Gmail filter with specified criteria and actions",
        )
        .string("from", "Filter emails from this sender")
        .string("to", "Filter emails to this recipient")
        .string("subject", "Filter emails with this subject")
        .string("query", "Additional search query criteria")
        .boolean("add_label", "Add label to matching messages")
        .string(
            "label_name",
            "Name of the label to add (required if add_label is true)",
        )
        .boolean("mark_important", "Mark matching messages as important")
        .boolean("mark_read", "Mark matching messages as read")
        .boolean("archive", "Archive matching messages")
        .build(),
        ToolSpec::new("gmail_list_filters", "List all Gmail filters in the account").build(),
        ToolSpec::new("gmail_list_labels", "List all Gmail labels in the account").build(),
        ToolSpec::new("gmail_delete_filter", "Delete a Gmail filter by its ID")
            .required_string("filter_id", "The ID of the filter to delete")
            .build(),
        ToolSpec::new("gmail_delete_label", "Delete a Gmail label by its ID")
            .required_string("label_id", "The ID of the label to delete")
            .build(),
    ]
}

pub(crate) async fn call(
    gmail: &dyn GmailProvider,
    name: &str,
    arguments: Option<Value>,
) -> Result<String> {
    match name {
        "gmail_search" => search(gmail, params::parse(arguments)?).await,
        "gmail_read_email" => read_email(gmail, params::parse(arguments)?).await,
        "gmail_reply_email" => reply_email(gmail, params::parse(arguments)?).await,
        "gmail_move_to_spam" => move_to_spam(gmail, params::parse(arguments)?).await,
        "gmail_create_filter" => create_filter(gmail, params::parse(arguments)?).await,
        "gmail_list_filters" => {
            let filters = gmail
                .list_filters()
                .await
                .map_err(failed("list filters"))?;
            Ok(filters_to_text(&filters))
        }
        "gmail_list_labels" => {
            let labels = gmail.list_labels().await.map_err(failed("list labels"))?;
            Ok(labels_to_text(&labels))
        }
        "gmail_delete_filter" => delete_filter(gmail, params::parse(arguments)?).await,
        "gmail_delete_label" => delete_label(gmail, params::parse(arguments)?).await,
        other => Err(Error::invalid_argument(format!("Unknown tool: {}", other))),
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

#[derive(Debug, Deserialize)]
struct ReadEmailParams {
    message_id: String,
    #[serde(default)]
    include_attachments: bool,
}

#[derive(Debug, Deserialize)]
struct ReplyEmailParams {
    message_id: String,
    reply_text: String,
    #[serde(default)]
    reply_all: bool,
}

#[derive(Debug, Deserialize)]
struct MoveToSpamParams {
    message_ids: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CreateFilterParams {
    from: Option<String>,
    to: Option<String>,
    subject: Option<String>,
    query: Option<String>,
    add_label: bool,
    label_name: Option<String>,
    mark_important: bool,
    mark_read: bool,
    archive: bool,
}

#[derive(Debug, Deserialize)]
struct DeleteFilterParams {
    filter_id: String,
}

#[derive(Debug, Deserialize)]
struct DeleteLabelParams {
    label_id: String,
}

async fn search(gmail: &dyn GmailProvider, params: SearchParams) -> Result<String> {
    let refs = gmail
        .list_messages(&params.query, SEARCH_LIMIT)
        .await
        .map_err(failed("search emails"))?;
    debug!(query = %params.query, hits = refs.len(), "Gmail search");

    let mut messages = Vec::with_capacity(refs.len());
    for message_ref in &refs {
        match gmail
            .get_message(&message_ref.id, MessageFormat::metadata(&SEARCH_HEADERS))
            .await
        {
            Ok(message) => messages.push(message),
            Err(e) => warn!(message_id = %message_ref.id, error = %e, "Skipping search hit"),
        }
    }

    Ok(search_results_to_text(refs.len(), &messages))
}

async fn read_email(gmail: &dyn GmailProvider, params: ReadEmailParams) -> Result<String> {
    let message_id = non_empty(&params.message_id, "message_id")?;
    let message = gmail
        .get_message(message_id, MessageFormat::Full)
        .await
        .map_err(failed("get email"))?;

    Ok(message_to_text(&message, params.include_attachments))
}

async fn reply_email(gmail: &dyn GmailProvider, params: ReplyEmailParams) -> Result<String> {
    let message_id = non_empty(&params.message_id, "message_id")?;
    let original = gmail
        .get_message(message_id, MessageFormat::metadata(&REPLY_SOURCE_HEADERS))
        .await
        .map_err(failed("get original email"))?;

    let reply = Reply::from_original(&original, params.reply_all);
    debug!(recipients = ?reply.to, "Sending reply");

    gmail
        .send_message(&reply.encode(&params.reply_text), original.thread_id.as_deref())
        .await
        .map_err(failed("send reply"))?;

    Ok("Reply sent successfully".to_string())
}

async fn move_to_spam(gmail: &dyn GmailProvider, params: MoveToSpamParams) -> Result<String> {
    let ids = comma_list(&params.message_ids);
    if ids.is_empty() {
        return Err(Error::invalid_argument("no message IDs provided"));
    }

    let change = LabelChange {
        add_label_ids: vec![SPAM.to_string()],
        ..Default::default()
    };
    for id in &ids {
        gmail.modify_message(id, &change).await.map_err(|e| {
            Error::Other(anyhow::anyhow!("failed to move email {} to spam: {}", id, e))
        })?;
    }

    Ok(format!("Successfully moved {} emails to spam.", ids.len()))
}

/// Find a label by exact name, creating it when missing.
async fn get_or_create_label(gmail: &dyn GmailProvider, name: &str) -> Result<Label> {
    let labels = gmail.list_labels().await?;
    if let Some(existing) = labels.into_iter().find(|l| l.name == name) {
        return Ok(existing);
    }

    info!(label = name, "Creating Gmail label");
    gmail.create_label(&Label::visible(name)).await
}

async fn create_filter(gmail: &dyn GmailProvider, params: CreateFilterParams) -> Result<String> {
    let owned = |value: &Option<String>| present(value).map(str::to_string);
    let criteria = FilterCriteria {
        from: owned(&params.from),
        to: owned(&params.to),
        subject: owned(&params.subject),
        query: owned(&params.query),
    };

    let mut action = FilterAction::default();
    if params.add_label {
        let label_name = present(&params.label_name).ok_or_else(|| {
            Error::invalid_argument("label_name is required when add_label is true")
        })?;
        let label = get_or_create_label(gmail, label_name)
            .await
            .map_err(failed("create/get label"))?;
        action.add_label_ids.push(label.id);
    }
    if params.mark_important {
        action.add_label_ids.push(IMPORTANT.to_string());
    }
    if params.mark_read {
        action.remove_label_ids.push(UNREAD.to_string());
    }
    if params.archive {
        action.remove_label_ids.push(INBOX.to_string());
    }

    let created = gmail
        .create_filter(&Filter {
            id: None,
            criteria,
            action,
        })
        .await
        .map_err(failed("create filter"))?;

    Ok(format!(
        "Successfully created filter with ID: {}",
        created.id.unwrap_or_default()
    ))
}

async fn delete_filter(gmail: &dyn GmailProvider, params: DeleteFilterParams) -> Result<String> {
    let filter_id = non_empty(&params.filter_id, "filter_id")?;
    gmail
        .delete_filter(filter_id)
        .await
        .map_err(failed("delete filter"))?;

    Ok(format!("Successfully deleted filter with ID: {}", filter_id))
}

async fn delete_label(gmail: &dyn GmailProvider, params: DeleteLabelParams) -> Result<String> {
    let label_id = non_empty(&params.label_id, "label_id")?;
    gmail
        .delete_label(label_id)
        .await
        .map_err(failed("delete label"))?;

    Ok(format!("Successfully deleted label with ID: {}", label_id))
}
