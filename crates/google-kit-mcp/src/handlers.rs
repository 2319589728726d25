//! Tool handlers for MCP server.
//!
//! This module routes tool calls to the Google service backing them and
//! turns the outcome into an MCP tool result.

use std::collections::HashMap;
use std::sync::Arc;

use google_kit_core::{
    CalendarProvider, ChatProvider, EnabledTools, Error, GmailProvider, Result, ToolGroup,
};
use serde_json::Value;

use crate::protocol::{ToolCallResult, ToolDefinition};
use crate::tools;

/// Provider behind one tool group.
#[derive(Clone)]
enum Service {
    Calendar(Arc<dyn CalendarProvider>),
    Gmail(Arc<dyn GmailProvider>),
    Chat(Arc<dyn ChatProvider>),
}

impl Service {
    fn group(&self) -> ToolGroup {
        match self {
            Service::Calendar(_) => ToolGroup::Calendar,
            Service::Gmail(_) => ToolGroup::Gmail,
            Service::Chat(_) => ToolGroup::Gchat,
        }
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        match self {
            Service::Calendar(_) => tools::calendar::definitions(),
            Service::Gmail(_) => tools::gmail::definitions(),
            Service::Chat(_) => tools::gchat::definitions(),
        }
    }

    async fn call(&self, name: &str, arguments: Option<Value>) -> Result<String> {
        match self {
            Service::Calendar(p) => tools::calendar::call(p.as_ref(), name, arguments).await,
            Service::Gmail(p) => tools::gmail::call(p.as_ref(), name, arguments).await,
            Service::Chat(p) => tools::gchat::call(p.as_ref(), name, arguments).await,
        }
    }
}

/// Tool handler that executes tools using the configured Google services.
///
/// A group's tools are registered only when the group is enabled and its
/// provider has been supplied.
pub struct ToolHandler {
    enabled: EnabledTools,
    tools: Vec<ToolDefinition>,
    routes: HashMap<String, Service>,
}

impl ToolHandler {
    /// Create a handler with no services attached yet.
    pub fn new(enabled: EnabledTools) -> Self {
        Self {
            enabled,
            tools: Vec::new(),
            routes: HashMap::new(),
        }
    }

    /// Attach the Calendar service.
    pub fn with_calendar(self, provider: Arc<dyn CalendarProvider>) -> Self {
        self.register(Service::Calendar(provider))
    }

    /// Attach the Gmail service.
    pub fn with_gmail(self, provider: Arc<dyn GmailProvider>) -> Self {
        self.register(Service::Gmail(provider))
    }

    /// Attach the Chat service.
    pub fn with_chat(self, provider: Arc<dyn ChatProvider>) -> Self {
        self.register(Service::Chat(provider))
    }

    fn register(mut self, service: Service) -> Self {
        let group = service.group();
        if !self.enabled.is_enabled(group) {
            tracing::debug!("Tool group {} is disabled", group);
            return self;
        }

        let definitions = service.definitions();
        tracing::info!("Registering {} {} tools", definitions.len(), group);
        for definition in definitions {
            self.routes
                .insert(definition.name.clone(), service.clone());
            self.tools.push(definition);
        }
        self
    }

    /// Get available tool definitions.
    pub fn available_tools(&self) -> Vec<ToolDefinition> {
        self.tools.clone()
    }

    /// Execute a tool by name.
    ///
    /// Each call runs on its own task so that a panic inside a tool is
    /// reported as a tool error instead of taking the server down.
    pub async fn execute(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        let Some(service) = self.routes.get(name).cloned() else {
            tracing::warn!("Unknown tool: {}", name);
            return ToolCallResult::error(format!("Unknown tool: {}", name));
        };

        let tool = name.to_string();
        let task = tokio::spawn(async move { service.call(&tool, arguments).await });

        match task.await {
            Ok(Ok(text)) => ToolCallResult::text(text),
            Ok(Err(Error::InvalidArgument(message))) => {
                tracing::debug!("Invalid arguments for {}: {}", name, message);
                ToolCallResult::error(message)
            }
            Ok(Err(e)) => {
                tracing::warn!("Tool {} failed: {}", name, e);
                ToolCallResult::error(e.to_string())
            }
            Err(e) => {
                tracing::error!("Tool {} aborted: {}", name, e);
                ToolCallResult::error(format!("tool {} panicked", name))
            }
        }
    }
}
