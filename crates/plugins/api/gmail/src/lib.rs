//! Gmail client for google-kit.
//!
//! Covers message search, reading, modification and sending, plus the
//! label and filter settings of the authenticated user.

mod client;
mod types;

pub use client::GmailClient;

/// Default Gmail API URL.
pub const DEFAULT_GMAIL_URL: &str = "https://gmail.googleapis.com/gmail/v1";

/// Gmail alias for the authenticated user.
pub const CURRENT_USER: &str = "me";
