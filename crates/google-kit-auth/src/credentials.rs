//! On-disk OAuth2 client secret and token formats.

use std::path::Path;

use chrono::{DateTime, Datelike, Duration, Utc};
use google_kit_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_TOKEN_URI;

/// Tokens this close to expiry are treated as expired.
const EXPIRY_DELTA_SECS: i64 = 10;

/// OAuth client secret, as downloaded from the Google Cloud console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The console wraps the secret in an `installed` or `web` object.
#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    #[serde(default)]
    installed: Option<ClientSecret>,
    #[serde(default)]
    web: Option<ClientSecret>,
}

impl ClientSecret {
    /// Parse a client secret JSON document.
    pub fn from_json(contents: &str) -> Result<Self> {
        let file: ClientSecretFile = serde_json::from_str(contents)
            .map_err(|e| Error::Config(format!("Unable to parse client secret file: {}", e)))?;

        file.installed.or(file.web).ok_or_else(|| {
            Error::Config(
                "Client secret file has neither an \"installed\" nor a \"web\" section"
                    .to_string(),
            )
        })
    }

    /// Read and parse a client secret file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Unable to read client secret file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }
}

/// Stored OAuth2 user token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    #[serde(default)]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    /// Read and parse a token file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read token file {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse token file: {}", e)))
    }

    /// Expiry instant, ignoring the zero timestamp some tools write for
    /// tokens without an expiry.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry.filter(|e| e.year() > 1)
    }

    /// Whether the access token can be used at `now` without refreshing.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        if self.access_token.is_empty() {
            return false;
        }
        match self.expires_at() {
            Some(expiry) => expiry - Duration::seconds(EXPIRY_DELTA_SECS) > now,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn token_expiring_at(expiry: Option<DateTime<Utc>>) -> StoredToken {
        StoredToken {
            access_token: "ya29.access".to_string(),
            token_type: Some("Bearer".to_string()),
            refresh_token: Some("1//refresh".to_string()),
            expiry,
        }
    }

    #[test]
    fn test_client_secret_installed() {
        let secret = ClientSecret::from_json(
            r#"{"installed":{"client_id":"id.apps.googleusercontent.com","client_secret":"shh","token_uri":"https://oauth2.googleapis.com/token","redirect_uris":["http://localhost"]}}"#,
        )
        .unwrap();
        assert_eq!(secret.client_id, "id.apps.googleusercontent.com");
        assert_eq!(secret.client_secret, "shh");
    }

    #[test]
    fn test_client_secret_web_defaults_token_uri() {
        let secret =
            ClientSecret::from_json(r#"{"web":{"client_id":"web-id","client_secret":"web-secret"}}"#)
                .unwrap();
        assert_eq!(secret.client_id, "web-id");
        assert_eq!(secret.token_uri, DEFAULT_TOKEN_URI);
    }

    #[test]
    fn test_client_secret_missing_section() {
        let err = ClientSecret::from_json(r#"{"other":{}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_client_secret_load_missing_file() {
        let err = ClientSecret::load("/nonexistent/credentials.json").unwrap_err();
        assert!(err.to_string().contains("Unable to read client secret file"));
    }

    #[test]
    fn test_token_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"access_token":"ya29.a","token_type":"Bearer","refresh_token":"1//r","expiry":"2024-05-01T10:00:00.5+07:00"}}"#
        )
        .unwrap();

        let token = StoredToken::load(file.path()).unwrap();
        assert_eq!(token.access_token, "ya29.a");
        assert_eq!(token.refresh_token.as_deref(), Some("1//r"));
        assert_eq!(
            token.expires_at().unwrap().to_rfc3339(),
            "2024-05-01T03:00:00.500+00:00"
        );
    }

    #[test]
    fn test_token_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = StoredToken::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse token file"));
    }

    #[test]
    fn test_token_fresh_before_expiry() {
        let now = Utc::now();
        let token = token_expiring_at(Some(now + Duration::minutes(30)));
        assert!(token.is_fresh(now));
    }

    #[test]
    fn test_token_stale_within_delta() {
        let now = Utc::now();
        let token = token_expiring_at(Some(now + Duration::seconds(5)));
        assert!(!token.is_fresh(now));
    }

    #[test]
    fn test_token_zero_expiry_never_expires() {
        let zero: DateTime<Utc> = "0001-01-01T00:00:00Z".parse().unwrap();
        let token = token_expiring_at(Some(zero));
        assert!(token.expires_at().is_none());
        assert!(token.is_fresh(Utc::now()));
    }

    #[test]
    fn test_token_empty_access_token_is_stale() {
        let mut token = token_expiring_at(None);
        token.access_token.clear();
        assert!(!token.is_fresh(Utc::now()));
    }
}
