use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type shared by the Membit adapter and the tool plumbing around it.
///
/// Only configuration, transport and argument problems surface as errors.
/// Anything that goes wrong after a successful HTTP response is absorbed by
/// the adapter and rendered as text instead.
#[derive(Debug, Error)]
pub enum MembitError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("Membit returned error {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("tool error: {0}")]
    Tool(String),
    #[error("tool not found: {0}")]
    ToolNotFound(String),
}

impl MembitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MembitError::Configuration(_) => ErrorKind::Configuration,
            MembitError::Transport(_) => ErrorKind::Transport,
            MembitError::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
            MembitError::Validation(_) => ErrorKind::Validation,
            MembitError::Tool(_) => ErrorKind::Tool,
            MembitError::ToolNotFound(_) => ErrorKind::ToolNotFound,
        }
    }
}

/// Discriminant of [`MembitError`], serializable for tool results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Transport,
    UpstreamStatus,
    Validation,
    Tool,
    ToolNotFound,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Transport => "transport",
            ErrorKind::UpstreamStatus => "upstream_status",
            ErrorKind::Validation => "validation",
            ErrorKind::Tool => "tool",
            ErrorKind::ToolNotFound => "tool_not_found",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ToolOutcome
// ---------------------------------------------------------------------------

/// Result of a search handed back to an agent: either the rendered text or
/// the kind and message of the failure. Callers match on it instead of
/// catching errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    Ok { text: String },
    Failed { kind: ErrorKind, message: String },
}

impl ToolOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ToolOutcome::Ok { .. })
    }

    /// Text for the agent. Failures are rendered through `on_error`.
    pub fn into_text(self, on_error: impl FnOnce(ErrorKind, &str) -> String) -> String {
        match self {
            ToolOutcome::Ok { text } => text,
            ToolOutcome::Failed { kind, message } => on_error(kind, &message),
        }
    }

    /// `{"ok": true, "text": ..}` or `{"ok": false, "error_kind": .., "message": ..}`.
    pub fn to_json(&self) -> Value {
        match self {
            ToolOutcome::Ok { text } => json!({ "ok": true, "text": text }),
            ToolOutcome::Failed { kind, message } => json!({
                "ok": false,
                "error_kind": kind,
                "message": message,
            }),
        }
    }
}

impl From<Result<String, MembitError>> for ToolOutcome {
    fn from(result: Result<String, MembitError>) -> Self {
        match result {
            Ok(text) => ToolOutcome::Ok { text },
            Err(err) => ToolOutcome::Failed {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }
}

/// Tool results: a JSON string becomes the text as-is, any other value its
/// compact JSON.
impl From<Result<Value, MembitError>> for ToolOutcome {
    fn from(result: Result<Value, MembitError>) -> Self {
        ToolOutcome::from(result.map(|value| match value {
            Value::String(text) => text,
            other => other.to_string(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Tool
// ---------------------------------------------------------------------------

/// Schema definition for a tool, including its name, description, and JSON Schema for parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// An executable tool that an agent can call with JSON arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    fn parameters(&self) -> Option<Value> {
        None
    }

    async fn call(&self, args: Value) -> Result<Value, MembitError>;

    fn as_tool_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self
                .parameters()
                .unwrap_or(json!({"type": "object", "properties": {}})),
        }
    }
}
