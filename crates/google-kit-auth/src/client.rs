//! Bearer-authenticated HTTP client shared by the Google API clients.

use std::sync::Arc;

use google_kit_core::{AccessTokenSource, Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Google JSON error envelope: `{"error": {"code": 404, "message": "..."}}`.
#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
}

/// HTTP client that attaches a fresh OAuth2 bearer token to every request.
#[derive(Clone)]
pub struct AuthorizedClient {
    http: reqwest::Client,
    tokens: Arc<dyn AccessTokenSource>,
}

impl AuthorizedClient {
    /// Create a client drawing tokens from the given source.
    pub fn new(tokens: Arc<dyn AccessTokenSource>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("google-kit")
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { http, tokens })
    }

    /// Build request with the bearer token.
    async fn request(&self, method: reqwest::Method, url: &str) -> Result<reqwest::RequestBuilder> {
        let token = self.tokens.access_token().await?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Make an authenticated GET request.
    pub async fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        debug!(url = url, "Google GET request");

        let response = self
            .request(reqwest::Method::GET, url)
            .await?
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        handle_response(response).await
    }

    /// Make an authenticated POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T> {
        debug!(url = url, "Google POST request");

        let response = self
            .request(reqwest::Method::POST, url)
            .await?
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        handle_response(response).await
    }

    /// Make an authenticated PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<T> {
        debug!(url = url, "Google PUT request");

        let response = self
            .request(reqwest::Method::PUT, url)
            .await?
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        handle_response(response).await
    }

    /// Make an authenticated DELETE request. The response body is ignored.
    pub async fn delete(&self, url: &str) -> Result<()> {
        debug!(url = url, "Google DELETE request");

        let response = self
            .request(reqwest::Method::DELETE, url)
            .await?
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }
}

/// Append path segments to `base`, percent-escaping each one.
///
/// A segment can never add path levels, a query or a fragment. Empty, `.`
/// and `..` segments are rejected.
pub fn resource_url(base: &str, segments: &[&str]) -> Result<String> {
    let mut url = reqwest::Url::parse(base)
        .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", base, e)))?;

    if let Some(bad) = segments
        .iter()
        .find(|s| s.is_empty() || **s == "." || **s == "..")
    {
        return Err(Error::invalid_argument(format!(
            "invalid resource id: {:?}",
            bad
        )));
    }

    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("Base URL cannot have a path: {}", base)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url.into())
}

/// Fail on non-success statuses, passing the response through otherwise.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let status_code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    warn!(status = status_code, message = %message, "Google API error response");
    Err(Error::from_status(status_code, message))
}

/// Handle response and map errors.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let response = check_status(response).await?;
    response
        .json()
        .await
        .map_err(|e| Error::InvalidData(format!("Failed to parse response: {}", e)))
}

/// Pull the human-readable message out of a Google error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body.trim().to_string(),
    }
}
