//! OAuth2 credentials and authorized HTTP access for google-kit.
//!
//! Loads the OAuth client secret and the stored user token from disk,
//! refreshes the access token when it is about to expire, and wraps
//! `reqwest` with bearer authentication and uniform error mapping.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use google_kit_auth::{AuthorizedClient, GoogleAuth};
//!
//! let auth = GoogleAuth::from_files("credentials.json", "token.json")?;
//! let client = AuthorizedClient::new(Arc::new(auth))?;
//! let labels: serde_json::Value = client
//!     .get("https://gmail.googleapis.com/gmail/v1/users/me/labels", &[])
//!     .await?;
//! ```

mod authenticator;
mod client;
mod credentials;

pub use authenticator::GoogleAuth;
pub use client::{resource_url, AuthorizedClient};
pub use credentials::{ClientSecret, StoredToken};

/// Default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth2 scopes the stored token is expected to carry.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/gmail.labels",
    "https://www.googleapis.com/auth/gmail.modify",
    "https://mail.google.com/",
    "https://www.googleapis.com/auth/gmail.settings.basic",
    "https://www.googleapis.com/auth/calendar",
    "https://www.googleapis.com/auth/calendar.events",
    "https://www.googleapis.com/auth/chat.spaces",
    "https://www.googleapis.com/auth/chat.messages",
    "https://www.googleapis.com/auth/chat.memberships",
];
