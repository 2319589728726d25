//! google-kit CLI - MCP server for Google Calendar, Gmail and Chat.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use google_kit_auth::{AuthorizedClient, GoogleAuth};
use google_kit_calendar::CalendarClient;
use google_kit_core::{Config, ToolGroup};
use google_kit_gchat::ChatClient;
use google_kit_gmail::GmailClient;
use google_kit_mcp::{McpServer, ToolHandler};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "google-kit")]
#[command(author, version, about = "MCP server for Google Calendar, Gmail and Chat", long_about = None)]
struct Cli {
    /// Path to the .env file to load before reading configuration
    #[arg(long, default_value = ".env")]
    env: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Accept the single-dash `-env` spelling as well as `--env`.
fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-env" || arg.starts_with("-env=") {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}

fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_logging(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

/// Load the dotenv file. Returns the warning to log once logging is up.
fn load_env_file(path: &Path) -> Option<String> {
    dotenvy::from_path(path)
        .err()
        .map(|e| format!("Could not load {}: {}", path.display(), e))
}

/// Build the tool handler with a client for every enabled group.
fn build_handler(config: &Config, http: AuthorizedClient) -> ToolHandler {
    let mut handler = ToolHandler::new(config.enabled_tools.clone());

    for group in config.enabled_tools.groups() {
        handler = match group {
            ToolGroup::Calendar => handler.with_calendar(Arc::new(CalendarClient::new(http.clone()))),
            ToolGroup::Gmail => handler.with_gmail(Arc::new(GmailClient::new(http.clone()))),
            ToolGroup::Gchat => handler.with_chat(Arc::new(ChatClient::new(http.clone()))),
        };
    }

    handler
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args()));

    let env_warning = load_env_file(&cli.env);
    init_logging(cli.verbose);
    match env_warning {
        Some(warning) => tracing::warn!("{}", warning),
        None => tracing::debug!("Loaded environment from {}", cli.env.display()),
    }

    let config = Config::from_env()?;
    let auth = GoogleAuth::from_files(&config.credentials_file, &config.token_file)?;
    let http = AuthorizedClient::new(Arc::new(auth))?;

    let mut server = McpServer::new(build_handler(&config, http));
    server.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_kit_core::{EnabledTools, StaticToken};

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_dash_env_is_accepted() {
        let cli = Cli::parse_from(normalize_args(args(&["google-kit", "-env", "prod.env"])));
        assert_eq!(cli.env, PathBuf::from("prod.env"));

        let cli = Cli::parse_from(normalize_args(args(&["google-kit", "-env=x.env", "-v"])));
        assert_eq!(cli.env, PathBuf::from("x.env"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(normalize_args(args(&["google-kit"])));
        assert_eq!(cli.env, PathBuf::from(".env"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_other_args_untouched() {
        assert_eq!(
            normalize_args(args(&["google-kit", "--env", "a", "-environment"])),
            args(&["google-kit", "--env", "a", "-environment"])
        );
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(log_filter(false, None).to_string(), "info");
        assert_eq!(
            log_filter(false, Some("google_kit_mcp=trace")).to_string(),
            "google_kit_mcp=trace"
        );
        assert_eq!(log_filter(true, Some("warn")).to_string(), "debug");
        assert_eq!(log_filter(false, Some("google_kit=loud")).to_string(), "info");
    }

    #[test]
    fn test_env_file_is_loaded_into_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.env");
        std::fs::write(&path, "GOOGLE_KIT_CLI_TEST_LOG=google_kit_mcp=trace\n").unwrap();

        assert_eq!(load_env_file(&path), None);
        assert_eq!(
            std::env::var("GOOGLE_KIT_CLI_TEST_LOG").unwrap(),
            "google_kit_mcp=trace"
        );
    }

    #[test]
    fn test_missing_env_file_yields_warning() {
        let dir = tempfile::tempdir().unwrap();
        let warning = load_env_file(&dir.path().join("absent.env")).unwrap();
        assert!(warning.starts_with("Could not load"));
        assert!(warning.contains("absent.env"));
    }

    #[test]
    fn test_build_handler_respects_enabled_groups() {
        let config = Config {
            credentials_file: PathBuf::from("credentials.json"),
            token_file: PathBuf::from("token.json"),
            enabled_tools: EnabledTools::parse(Some("calendar,gchat")),
        };
        let http = AuthorizedClient::new(Arc::new(StaticToken::new("t"))).unwrap();

        let tools = build_handler(&config, http).available_tools();
        assert_eq!(tools.len(), 8);
        assert!(tools.iter().all(|t| !t.name.starts_with("gmail_")));
    }
}
