//! Google Chat client for google-kit.

mod client;
mod types;

pub use client::ChatClient;

/// Default Chat API URL.
pub const DEFAULT_CHAT_URL: &str = "https://chat.googleapis.com/v1";

/// Reply in the named thread, or start a new one if it no longer exists.
pub const REPLY_FALLBACK_TO_NEW_THREAD: &str = "REPLY_MESSAGE_FALLBACK_TO_NEW_THREAD";
