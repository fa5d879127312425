//! Tool domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Tool arguments: unique keys, arbitrary structured values.
pub type ToolArguments = serde_json::Map<String, serde_json::Value>;

/// A call to a tool with arguments.
///
/// Travels in both directions: the backend echoes the call it already ran
/// inside a chat reply, and the caller sends one to `/tools/execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call (e.g. "lights.off")
    pub name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: ToolArguments,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: ToolArguments::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_arguments(mut self, arguments: ToolArguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Reject calls whose name is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyToolName);
        }
        Ok(())
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }
}

/// Description of a tool as advertised by `GET /tools`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Permissions the tool needs; each one requires a standing grant or a
    /// per-call override.
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub params_schema: serde_json::Value,
    #[serde(default)]
    pub returns_schema: serde_json::Value,
}

impl ToolDescriptor {
    /// True if the tool cannot run without consent.
    pub fn requires_consent(&self) -> bool {
        !self.permissions.is_empty()
    }
}

/// Ordered list of tools exactly as the backend returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolCatalog {
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tools that need `permission` before they can run.
    pub fn requiring<'a>(&'a self, permission: &'a str) -> impl Iterator<Item = &'a ToolDescriptor> {
        self.tools
            .iter()
            .filter(move |t| t.permissions.iter().any(|p| p == permission))
    }
}

/// Result of `POST /tools/execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExecution {
    #[serde(default)]
    pub result: serde_json::Value,
}
