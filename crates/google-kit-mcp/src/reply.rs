//! Construction of Gmail reply messages.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use google_kit_core::Message;

/// Reply-all skips any address containing this marker.
pub(crate) const OWN_ADDRESS_MARKER: &str = "me@";

/// Headers fetched from the original message to build a reply.
pub(crate) const REPLY_SOURCE_HEADERS: [&str; 5] =
    ["From", "To", "Subject", "Message-ID", "References"];

/// Headers of a reply, derived from the message being answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reply {
    pub to: Vec<String>,
    pub subject: String,
    pub in_reply_to: String,
    pub references: String,
}

/// Prefix `Re: ` unless the subject already starts with it (any case).
pub(crate) fn reply_subject(subject: &str) -> String {
    let already_prefixed = subject
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("re:"));
    if already_prefixed {
        subject.to_string()
    } else {
        format!("Re: {}", subject)
    }
}

impl Reply {
    /// Derive reply headers from the original message.
    pub fn from_original(original: &Message, reply_all: bool) -> Self {
        let header = |name: &str| original.header(name).unwrap_or_default();

        let mut to = vec![header("From").to_string()];
        if reply_all {
            to.extend(
                header("To")
                    .split(',')
                    .map(str::trim)
                    .filter(|addr| !addr.is_empty() && !addr.contains(OWN_ADDRESS_MARKER))
                    .map(str::to_string),
            );
        }

        let message_id = header("Message-ID");
        let references = match original.header("References").filter(|r| !r.is_empty()) {
            Some(refs) if !message_id.is_empty() => format!("{} {}", refs, message_id),
            Some(refs) => refs.to_string(),
            None => message_id.to_string(),
        };

        Self {
            to,
            subject: reply_subject(header("Subject")),
            in_reply_to: message_id.to_string(),
            references,
        }
    }

    /// RFC 822 text of the reply with CRLF line endings.
    pub fn render(&self, body: &str) -> String {
        let headers = [
            ("To", self.to.join(", ")),
            ("Subject", self.subject.clone()),
            ("In-Reply-To", self.in_reply_to.clone()),
            ("References", self.references.clone()),
        ];

        let mut raw = String::new();
        for (name, value) in headers {
            raw.push_str(&format!("{}: {}\r\n", name, value));
        }
        raw.push_str("\r\n");
        raw.push_str(body);
        raw
    }

    /// Base64url form expected by `messages.send`.
    pub fn encode(&self, body: &str) -> String {
        URL_SAFE.encode(self.render(body))
    }
}
