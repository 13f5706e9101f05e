mod handle_error;

pub use handle_error::HandleErrorTool;

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use membit_core::{MembitError, Tool, ToolDefinition, ToolOutcome};

/// Thread-safe registry of tools keyed by name, backed by `Arc<RwLock<HashMap>>`.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    inner: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&self, tool: Arc<dyn Tool>) -> Result<(), MembitError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| MembitError::Tool(format!("registry lock poisoned: {e}")))?;
        guard.insert(tool.name().to_string(), tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let guard = self.inner.read().ok()?;
        guard.get(name).cloned()
    }

    /// Definitions of every registered tool, sorted by name, ready to hand
    /// to a model as its tool list.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let Ok(guard) = self.inner.read() else {
            return Vec::new();
        };
        let mut defs: Vec<ToolDefinition> =
            guard.values().map(|tool| tool.as_tool_definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }
}

/// Executes tool calls one at a time, looking tools up in a `ToolRegistry`.
#[derive(Clone)]
pub struct SerialToolExecutor {
    registry: ToolRegistry,
}

impl SerialToolExecutor {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        tool_name: &str,
        args: serde_json::Value,
    ) -> Result<serde_json::Value, MembitError> {
        let tool = self
            .registry
            .get(tool_name)
            .ok_or_else(|| MembitError::ToolNotFound(tool_name.to_string()))?;
        tracing::debug!(tool = tool_name, "executing tool");
        tool.call(args).await
    }

    /// Like [`execute`](Self::execute), but an unknown tool or a failed call
    /// comes back as [`ToolOutcome::Failed`] for the agent loop to match on.
    pub async fn run(&self, tool_name: &str, args: serde_json::Value) -> ToolOutcome {
        ToolOutcome::from(self.execute(tool_name, args).await)
    }
}
