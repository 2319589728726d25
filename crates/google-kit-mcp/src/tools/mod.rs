//! Tool catalog and per-service tool implementations.

pub(crate) mod calendar;
pub(crate) mod gchat;
pub(crate) mod gmail;

use google_kit_core::Error;
use serde_json::{json, Map, Value};

use crate::protocol::ToolDefinition;

/// Builder for a tool definition and its JSON input schema.
pub(crate) struct ToolSpec {
    name: &'static str,
    description: &'static str,
    properties: Map<String, Value>,
    required: Vec<&'static str>,
}

impl ToolSpec {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    fn param(
        mut self,
        name: &'static str,
        kind: &str,
        description: &'static str,
        required: bool,
    ) -> Self {
        self.properties.insert(
            name.to_string(),
            json!({"type": kind, "description": description}),
        );
        if required {
            self.required.push(name);
        }
        self
    }

    pub fn string(self, name: &'static str, description: &'static str) -> Self {
        self.param(name, "string", description, false)
    }

    pub fn required_string(self, name: &'static str, description: &'static str) -> Self {
        self.param(name, "string", description, true)
    }

    pub fn number(self, name: &'static str, description: &'static str) -> Self {
        self.param(name, "number", description, false)
    }

    pub fn boolean(self, name: &'static str, description: &'static str) -> Self {
        self.param(name, "boolean", description, false)
    }

    pub fn build(self) -> ToolDefinition {
        let mut schema = json!({
            "type": "object",
            "properties": self.properties,
        });
        if !self.required.is_empty() {
            schema["required"] = json!(self.required);
        }

        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: schema,
        }
    }
}

/// Wrap a service failure as `failed to <action>: <cause>`.
pub(crate) fn failed(action: &'static str) -> impl FnOnce(Error) -> Error {
    move |e| Error::Other(anyhow::anyhow!("failed to {}: {}", action, e))
}
