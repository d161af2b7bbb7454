use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::agent::Command;

use super::error::ToolError;
use super::runtime::ToolRuntime;

#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the name of the tool.
    fn name(&self) -> String;

    /// Provides a description of what the tool does and when to use it.
    fn description(&self) -> String;

    /// JSON Schema of the arguments, in the shape OpenAI-like function calls expect.
    ///
    /// The default describes a single string argument called `input`. Tools
    /// with typed arguments return [`parameters_for`](super::parameters_for).
    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "input": {
                    "type": "string",
                    "description": self.description()
                }
            },
            "required": ["input"]
        })
    }

    /// Parses the raw argument text and runs the tool. This is what the session calls.
    async fn call(&self, input: &str, runtime: &ToolRuntime) -> Result<ToolResult, ToolError> {
        let input = self.parse_input(input).await;
        self.run(input, runtime).await
    }

    /// Executes the core functionality of the tool.
    ///
    /// The runtime only offers a snapshot of the state. To change state,
    /// return [`ToolResult::WithCommand`].
    async fn run(&self, input: Value, runtime: &ToolRuntime) -> Result<ToolResult, ToolError>;

    /// Parses the input string, which could be a JSON value or a raw string, depending on the LLM model.
    async fn parse_input(&self, input: &str) -> Value {
        log::debug!("Parsing input for {}: {}", self.name(), input);
        match serde_json::from_str::<Value>(input) {
            Ok(value) => value,
            Err(_) => Value::String(input.to_string()),
        }
    }
}

/// Deserialize parsed tool input into a typed argument struct.
pub fn parse_args<T: DeserializeOwned>(input: Value) -> Result<T, ToolError> {
    serde_json::from_value(input).map_err(|e| ToolError::InvalidInputError(e.to_string()))
}

/// Result type for tool execution that can return either text or a command.
#[derive(Debug)]
pub enum ToolResult {
    /// Plain text for the agent, no state change
    Text(String),
    /// Text plus a command for the state owner to apply
    WithCommand { text: String, command: Command },
}

impl ToolResult {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Text(text.into())
    }

    pub fn with_command<S: Into<String>>(text: S, command: Command) -> Self {
        Self::WithCommand {
            text: text.into(),
            command,
        }
    }

    pub fn command(&self) -> Option<&Command> {
        match self {
            Self::Text(_) => None,
            Self::WithCommand { command, .. } => Some(command),
        }
    }

    pub fn into_parts(self) -> (String, Option<Command>) {
        match self {
            Self::Text(s) => (s, None),
            Self::WithCommand { text, command } => (text, Some(command)),
        }
    }

    pub fn into_string(self) -> String {
        self.into_parts().0
    }
}

impl From<String> for ToolResult {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
