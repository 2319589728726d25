//! Gmail text summaries and MIME body extraction.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use google_kit_core::{Filter, Label, Message, MessagePart};
use tracing::debug;

use crate::SEPARATOR;

/// Gmail body data is base64url; padding is present or absent depending on
/// the message.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Placeholder body when no `text/plain` part can be decoded.
pub const NO_TEXT_BODY: &str = "No readable text body found";

/// Headers shown by `gmail_read_email`, in message order.
const READ_HEADERS: [&str; 5] = ["From", "To", "Cc", "Subject", "Date"];

fn decode_body(data: &str) -> std::result::Result<String, base64::DecodeError> {
    let bytes = BODY_ENGINE.decode(data.trim())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Return the first decodable `text/plain` body, searching nested parts.
pub fn extract_body(payload: &MessagePart) -> String {
    let own_data = payload
        .body
        .as_ref()
        .and_then(|b| b.data.as_deref())
        .filter(|d| !d.is_empty());

    if payload.mime_type == "text/plain" {
        if let Some(data) = own_data {
            return match decode_body(data) {
                Ok(text) => text,
                Err(e) => format!("Error decoding body: {}", e),
            };
        }
    }

    find_text_part(&payload.parts).unwrap_or_else(|| NO_TEXT_BODY.to_string())
}

fn find_text_part(parts: &[MessagePart]) -> Option<String> {
    for part in parts {
        if part.mime_type == "text/plain" {
            let data = part.body.as_ref().and_then(|b| b.data.as_deref());
            match data.map(decode_body) {
                Some(Ok(text)) => return Some(text),
                Some(Err(e)) => debug!(error = %e, "Skipping undecodable text part"),
                None => {}
            }
        }
        if let Some(text) = find_text_part(&part.parts) {
            return Some(text);
        }
    }
    None
}

fn collect_attachments<'a>(parts: &'a [MessagePart], out: &mut Vec<&'a MessagePart>) {
    for part in parts {
        if !part.filename.is_empty() {
            out.push(part);
        }
        collect_attachments(&part.parts, out);
    }
}

/// Render `gmail_search` results.
///
/// `found` is the number of hits reported by the search; messages that could
/// not be fetched are absent from `messages`.
pub fn search_results_to_text(found: usize, messages: &[Message]) -> String {
    let mut output = format!("Found {} emails:\n\n", found);

    for message in messages {
        output.push_str(&format!("Message ID: {}\n", message.id));
        output.push_str(&format!("From: {}\n", message.header("From").unwrap_or_default()));
        output.push_str(&format!(
            "Subject: {}\n",
            message.header("Subject").unwrap_or_default()
        ));
        output.push_str(&format!("Date: {}\n", message.header("Date").unwrap_or_default()));
        output.push_str(&format!("Snippet: {}\n", message.snippet));
        output.push_str(SEPARATOR);
        output.push('\n');
    }

    output
}

/// Render a full message for `gmail_read_email`.
pub fn message_to_text(message: &Message, include_attachments: bool) -> String {
    let mut output = String::new();
    let Some(payload) = &message.payload else {
        output.push_str("\nBody:\n");
        output.push_str(NO_TEXT_BODY);
        output.push('\n');
        return output;
    };

    for header in &payload.headers {
        if READ_HEADERS
            .iter()
            .any(|name| header.name.eq_ignore_ascii_case(name))
        {
            output.push_str(&format!("{}: {}\n", header.name, header.value));
        }
    }

    output.push_str("\nBody:\n");
    output.push_str(&extract_body(payload));
    output.push('\n');

    if include_attachments && !payload.parts.is_empty() {
        let mut attachments = Vec::new();
        collect_attachments(&payload.parts, &mut attachments);

        output.push_str("\nAttachments:\n");
        for part in attachments {
            let size = part.body.as_ref().map(|b| b.size).unwrap_or_default();
            output.push_str(&format!("- {} (Size: {} bytes)\n", part.filename, size));
        }
    }

    output
}

/// Render `gmail_list_filters`.
pub fn filters_to_text(filters: &[Filter]) -> String {
    let mut output = format!("Found {} filters:\n\n", filters.len());

    for filter in filters {
        output.push_str(&format!(
            "Filter ID: {}\n",
            filter.id.as_deref().unwrap_or_default()
        ));

        output.push_str("Criteria:\n");
        let criteria = [
            ("From", &filter.criteria.from),
            ("To", &filter.criteria.to),
            ("Subject", &filter.criteria.subject),
            ("Query", &filter.criteria.query),
        ];
        for (name, value) in criteria {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                output.push_str(&format!("  {}: {}\n", name, value));
            }
        }

        output.push_str("Actions:\n");
        if !filter.action.add_label_ids.is_empty() {
            output.push_str(&format!(
                "  Add Labels: {}\n",
                filter.action.add_label_ids.join(", ")
            ));
        }
        if !filter.action.remove_label_ids.is_empty() {
            output.push_str(&format!(
                "  Remove Labels: {}\n",
                filter.action.remove_label_ids.join(", ")
            ));
        }
        output.push_str(SEPARATOR);
        output.push('\n');
    }

    output
}

/// Render `gmail_list_labels`: system labels first, then user labels.
pub fn labels_to_text(labels: &[Label]) -> String {
    let mut output = format!("Found {} labels:\n\n", labels.len());

    output.push_str("System Labels:\n");
    for label in labels.iter().filter(|l| l.is_system()) {
        output.push_str(&format!("- {} (ID: {})\n", label.name, label.id));
    }

    output.push_str("\nUser Labels:\n");
    for label in labels.iter().filter(|l| l.is_user()) {
        output.push_str(&format!("- {} (ID: {})\n", label.name, label.id));
        if let Some(total) = label.messages_total.filter(|t| *t > 0) {
            output.push_str(&format!("  Messages: {}\n", total));
        }
    }

    output
}
