//! File-backed OAuth2 token source with refresh-token exchange.

use std::path::Path;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use google_kit_core::{AccessTokenSource, Error, Result};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::credentials::{ClientSecret, StoredToken};

/// Successful response of the token endpoint.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Token source backed by a client secret and a stored user token.
///
/// Refreshed tokens live in memory only; the token file is never rewritten.
pub struct GoogleAuth {
    secret: ClientSecret,
    token: Mutex<StoredToken>,
    http: reqwest::Client,
}

impl GoogleAuth {
    /// Create a token source from already-parsed credentials.
    pub fn new(secret: ClientSecret, token: StoredToken) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("google-kit")
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            secret,
            token: Mutex::new(token),
            http,
        })
    }

    /// Load the client secret and stored token from disk.
    pub fn from_files(credentials_file: impl AsRef<Path>, token_file: impl AsRef<Path>) -> Result<Self> {
        let token = StoredToken::load(token_file)?;
        let secret = ClientSecret::load(credentials_file)?;
        info!(client_id = %secret.client_id, "Loaded Google OAuth credentials");
        debug!(scopes = ?crate::SCOPES, "Expected token scopes");
        Self::new(secret, token)
    }

    /// Exchange the refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse> {
        debug!(token_uri = %self.secret.token_uri, "Refreshing OAuth access token");

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
        ];

        let response = self
            .http
            .post(&self.secret.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Token refresh rejected");
            return Err(Error::Auth(format!(
                "token refresh failed ({}): {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::InvalidData(format!("Failed to parse token response: {}", e)))
    }
}

#[async_trait]
impl AccessTokenSource for GoogleAuth {
    async fn access_token(&self) -> Result<String> {
        let mut token = self.token.lock().await;
        let now = Utc::now();

        if token.is_fresh(now) {
            return Ok(token.access_token.clone());
        }

        let refresh_token = token.refresh_token.clone().ok_or_else(|| {
            Error::Auth("token expired and refresh token is not set".to_string())
        })?;

        let refreshed = self.refresh(&refresh_token).await?;

        token.access_token = refreshed.access_token;
        if refreshed.token_type.is_some() {
            token.token_type = refreshed.token_type;
        }
        if refreshed.refresh_token.is_some() {
            token.refresh_token = refreshed.refresh_token;
        }
        token.expiry = refreshed
            .expires_in
            .map(|secs| now + Duration::seconds(secs));

        debug!(expiry = ?token.expiry, "Access token refreshed");
        Ok(token.access_token.clone())
    }
}
