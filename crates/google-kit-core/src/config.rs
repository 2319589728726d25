//! Configuration management for google-kit.
//!
//! All settings come from the process environment, usually populated from a
//! dotenv file by the binary before [`Config::from_env`] runs:
//!
//! - `GOOGLE_CREDENTIALS_FILE`: OAuth client secret JSON
//! - `GOOGLE_TOKEN_FILE`: stored OAuth token JSON
//! - `ENABLE_TOOLS`: comma-separated tool groups (`calendar`, `gmail`, `gchat`);
//!   empty or unset enables every group
//!
//! # Example
//!
//! ```ignore
//! use google_kit_core::{Config, ToolGroup};
//!
//! let config = Config::from_env()?;
//! if config.enabled_tools.is_enabled(ToolGroup::Gmail) {
//!     // register Gmail tools
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Error, Result};
use tracing::{debug, warn};

/// Env var holding the OAuth client secret path.
pub const CREDENTIALS_FILE_VAR: &str = "GOOGLE_CREDENTIALS_FILE";

/// Env var holding the stored OAuth token path.
pub const TOKEN_FILE_VAR: &str = "GOOGLE_TOKEN_FILE";

/// Env var holding the tool group allow-list.
pub const ENABLE_TOOLS_VAR: &str = "ENABLE_TOOLS";

// =============================================================================
// Tool groups
// =============================================================================

/// A group of tools backed by one Google service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolGroup {
    Calendar,
    Gmail,
    Gchat,
}

impl ToolGroup {
    /// All groups in registration order.
    pub const ALL: [ToolGroup; 3] = [ToolGroup::Calendar, ToolGroup::Gmail, ToolGroup::Gchat];

    /// Name used in `ENABLE_TOOLS`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolGroup::Calendar => "calendar",
            ToolGroup::Gmail => "gmail",
            ToolGroup::Gchat => "gchat",
        }
    }
}

impl fmt::Display for ToolGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "calendar" => Ok(ToolGroup::Calendar),
            "gmail" => Ok(ToolGroup::Gmail),
            "gchat" => Ok(ToolGroup::Gchat),
            other => Err(Error::Config(format!("Unknown tool group: {}", other))),
        }
    }
}

/// Allow-list of tool groups parsed from `ENABLE_TOOLS`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnabledTools {
    /// Every group is enabled (variable empty or unset)
    #[default]
    All,
    /// Only the listed groups are enabled
    Only(Vec<ToolGroup>),
}

impl EnabledTools {
    /// Parse the raw `ENABLE_TOOLS` value.
    ///
    /// Entries are trimmed; blank entries are skipped and unknown names are
    /// logged and ignored.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or("");
        if raw.trim().is_empty() {
            return EnabledTools::All;
        }

        let mut groups = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.parse::<ToolGroup>() {
                Ok(group) if !groups.contains(&group) => groups.push(group),
                Ok(_) => {}
                Err(_) => warn!(group = entry, "Ignoring unknown tool group in ENABLE_TOOLS"),
            }
        }
        EnabledTools::Only(groups)
    }

    /// Check whether a group should be registered.
    pub fn is_enabled(&self, group: ToolGroup) -> bool {
        match self {
            EnabledTools::All => true,
            EnabledTools::Only(groups) => groups.contains(&group),
        }
    }

    /// Enabled groups in registration order.
    pub fn groups(&self) -> Vec<ToolGroup> {
        ToolGroup::ALL
            .into_iter()
            .filter(|g| self.is_enabled(*g))
            .collect()
    }
}

// =============================================================================
// Config
// =============================================================================

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the OAuth client secret JSON
    pub credentials_file: PathBuf,
    /// Path to the stored OAuth token JSON
    pub token_file: PathBuf,
    /// Which tool groups to register
    pub enabled_tools: EnabledTools,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<PathBuf> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .ok_or_else(|| Error::Config(format!("{} environment variable must be set", key)))
        };

        let credentials_file = required(CREDENTIALS_FILE_VAR)?;
        let token_file = required(TOKEN_FILE_VAR)?;
        let enabled_tools = EnabledTools::parse(lookup(ENABLE_TOOLS_VAR).as_deref());

        debug!(
            credentials = ?credentials_file,
            token = ?token_file,
            tools = ?enabled_tools,
            "Configuration loaded"
        );

        Ok(Self {
            credentials_file,
            token_file,
            enabled_tools,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_enabled_tools_unset_means_all() {
        let tools = EnabledTools::parse(None);
        assert_eq!(tools, EnabledTools::All);
        assert_eq!(tools.groups(), ToolGroup::ALL.to_vec());
    }

    #[test]
    fn test_enabled_tools_empty_means_all() {
        assert_eq!(EnabledTools::parse(Some("")), EnabledTools::All);
        assert_eq!(EnabledTools::parse(Some("  ")), EnabledTools::All);
    }

    #[test]
    fn test_enabled_tools_single_group() {
        let tools = EnabledTools::parse(Some("gmail"));
        assert!(tools.is_enabled(ToolGroup::Gmail));
        assert!(!tools.is_enabled(ToolGroup::Calendar));
        assert!(!tools.is_enabled(ToolGroup::Gchat));
    }

    #[test]
    fn test_enabled_tools_trims_and_skips_unknown() {
        let tools = EnabledTools::parse(Some("gchat, calendar,,youtube"));
        assert_eq!(tools.groups(), vec![ToolGroup::Calendar, ToolGroup::Gchat]);
    }

    #[test]
    fn test_enabled_tools_only_unknown_enables_nothing() {
        let tools = EnabledTools::parse(Some("youtube"));
        assert!(tools.groups().is_empty());
    }

    #[test]
    fn test_tool_group_round_trip_names() {
        for group in ToolGroup::ALL {
            assert_eq!(group.as_str().parse::<ToolGroup>().unwrap(), group);
        }
        assert!("Gmail".parse::<ToolGroup>().is_err());
    }

    #[test]
    fn test_config_from_lookup() {
        let config = Config::from_lookup(lookup(&[
            (CREDENTIALS_FILE_VAR, "/etc/google/credentials.json"),
            (TOKEN_FILE_VAR, "/etc/google/token.json"),
            (ENABLE_TOOLS_VAR, "calendar"),
        ]))
        .unwrap();

        assert_eq!(
            config.credentials_file,
            PathBuf::from("/etc/google/credentials.json")
        );
        assert_eq!(config.token_file, PathBuf::from("/etc/google/token.json"));
        assert_eq!(
            config.enabled_tools,
            EnabledTools::Only(vec![ToolGroup::Calendar])
        );
    }

    #[test]
    fn test_config_missing_credentials() {
        let err = Config::from_lookup(lookup(&[(TOKEN_FILE_VAR, "/tmp/token.json")])).unwrap_err();
        assert!(err
            .to_string()
            .contains("GOOGLE_CREDENTIALS_FILE environment variable must be set"));
    }

    #[test]
    fn test_config_missing_token() {
        let err = Config::from_lookup(lookup(&[(CREDENTIALS_FILE_VAR, "/tmp/creds.json")]))
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("GOOGLE_TOKEN_FILE environment variable must be set"));
    }

    #[test]
    fn test_config_blank_value_is_missing() {
        let err = Config::from_lookup(lookup(&[
            (CREDENTIALS_FILE_VAR, ""),
            (TOKEN_FILE_VAR, "/tmp/token.json"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
