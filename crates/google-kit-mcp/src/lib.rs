//! MCP (Model Context Protocol) server for google-kit.
//!
//! Exposes Google Calendar, Gmail and Google Chat operations as MCP tools
//! over newline-delimited JSON-RPC on stdin/stdout.

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod transport;

mod params;
mod reply;
mod tools;

#[cfg(test)]
mod testing;

pub use handlers::ToolHandler;
pub use server::McpServer;
pub use transport::StdioTransport;
