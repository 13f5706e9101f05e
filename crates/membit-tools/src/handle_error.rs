use std::sync::Arc;

use async_trait::async_trait;
use membit_core::{ErrorKind, MembitError, Tool, ToolOutcome};
use serde_json::{json, Value};

type FailureRenderer = Box<dyn Fn(ErrorKind, &str) -> String + Send + Sync>;

/// Wraps a tool so that every call resolves to a [`ToolOutcome`] and a
/// failed search reaches the agent as text instead of ending its loop.
///
/// By default the agent sees the outcome text; with
/// [`structured`](Self::structured) it sees the outcome JSON
/// (`{"ok": false, "error_kind": .., "message": ..}` on failure).
pub struct HandleErrorTool {
    inner: Arc<dyn Tool>,
    render: FailureRenderer,
    structured: bool,
}

impl HandleErrorTool {
    /// Failures render as the error message.
    pub fn new(inner: Arc<dyn Tool>) -> Self {
        Self::with_handler(inner, |_, message| message.to_string())
    }

    /// Failures render as `"{label} search failed: {message}"`.
    pub fn labelled(inner: Arc<dyn Tool>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self::with_handler(inner, move |_, message| {
            format!("{label} search failed: {message}")
        })
    }

    /// Failures render through `handler`, which sees the error kind and message.
    pub fn with_handler(
        inner: Arc<dyn Tool>,
        handler: impl Fn(ErrorKind, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner,
            render: Box::new(handler),
            structured: false,
        }
    }

    /// Return the outcome JSON instead of text.
    pub fn structured(mut self) -> Self {
        self.structured = true;
        self
    }

    /// Call the wrapped tool and fold its result into a [`ToolOutcome`].
    pub async fn outcome(&self, args: Value) -> ToolOutcome {
        let outcome = ToolOutcome::from(self.inner.call(args).await);
        if let ToolOutcome::Failed { kind, message } = &outcome {
            tracing::warn!(
                tool = self.inner.name(),
                kind = kind.as_str(),
                error = %message,
                "tool call failed"
            );
        }
        outcome
    }
}

#[async_trait]
impl Tool for HandleErrorTool {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn description(&self) -> &'static str {
        self.inner.description()
    }

    fn parameters(&self) -> Option<Value> {
        self.inner.parameters()
    }

    async fn call(&self, args: Value) -> Result<Value, MembitError> {
        let outcome = self.outcome(args).await;
        if self.structured {
            return Ok(outcome.to_json());
        }
        Ok(json!(outcome.into_text(|kind, message| (self.render)(kind, message))))
    }
}
