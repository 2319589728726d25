//! Core traits, types, and error handling for google-kit.
//!
//! This crate provides the foundational abstractions shared by the Google API
//! clients, the output formatters, and the MCP server.

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use config::{Config, EnabledTools, ToolGroup};
pub use error::{Error, Result};
pub use provider::{AccessTokenSource, CalendarProvider, ChatProvider, GmailProvider, StaticToken};
pub use types::*;
