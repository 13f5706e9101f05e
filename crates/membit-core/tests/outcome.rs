use async_trait::async_trait;
use membit_core::{ErrorKind, MembitError, Tool, ToolOutcome};
use serde_json::json;

// ---------------------------------------------------------------------------
// MembitError
// ---------------------------------------------------------------------------

#[test]
fn upstream_status_display_keeps_body_verbatim() {
    let err = MembitError::UpstreamStatus {
        status: 503,
        body: "{\"error\":\"overloaded\"}".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Membit returned error 503: {\"error\":\"overloaded\"}"
    );
    assert_eq!(err.kind(), ErrorKind::UpstreamStatus);
}

#[test]
fn error_kinds_match_variants() {
    assert_eq!(
        MembitError::Configuration("x".into()).kind(),
        ErrorKind::Configuration
    );
    assert_eq!(MembitError::Transport("x".into()).kind(), ErrorKind::Transport);
    assert_eq!(
        MembitError::Validation("x".into()).kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        MembitError::ToolNotFound("x".into()).kind(),
        ErrorKind::ToolNotFound
    );
}

#[test]
fn error_kind_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(ErrorKind::UpstreamStatus).unwrap(),
        json!("upstream_status")
    );
    assert_eq!(format!("{}", ErrorKind::ToolNotFound), "tool_not_found");
}

// ---------------------------------------------------------------------------
// ToolOutcome
// ---------------------------------------------------------------------------

#[test]
fn outcome_from_ok_result() {
    let outcome = ToolOutcome::from(Ok::<String, MembitError>(
        "1. X — Y (mentions: 5)".to_string(),
    ));
    assert!(outcome.is_ok());
    assert_eq!(
        outcome.to_json(),
        json!({"ok": true, "text": "1. X — Y (mentions: 5)"})
    );
}

#[test]
fn outcome_from_error_result() {
    let outcome = ToolOutcome::from(Err::<String, _>(MembitError::Configuration(
        "MEMBIT_API_KEY is not set in the environment".into(),
    )));
    assert!(!outcome.is_ok());
    assert_eq!(
        outcome.to_json(),
        json!({
            "ok": false,
            "error_kind": "configuration",
            "message": "configuration error: MEMBIT_API_KEY is not set in the environment",
        })
    );
}

#[test]
fn into_text_formats_failures() {
    let failed = ToolOutcome::Failed {
        kind: ErrorKind::Transport,
        message: "connection refused".into(),
    };
    let text = failed.into_text(|kind, msg| format!("{kind}: {msg}"));
    assert_eq!(text, "transport: connection refused");

    let ok = ToolOutcome::Ok { text: "fine".into() };
    assert_eq!(ok.into_text(|_, _| unreachable!()), "fine");
}

// ---------------------------------------------------------------------------
// Tool
// ---------------------------------------------------------------------------

struct BareTool;

#[async_trait]
impl Tool for BareTool {
    fn name(&self) -> &'static str {
        "bare"
    }

    fn description(&self) -> &'static str {
        "No parameters"
    }

    async fn call(&self, _args: serde_json::Value) -> Result<serde_json::Value, MembitError> {
        Ok(json!("done"))
    }
}

#[tokio::test]
async fn default_definition_has_empty_object_schema() {
    let tool = BareTool;
    let def = tool.as_tool_definition();
    assert_eq!(def.name, "bare");
    assert_eq!(def.description, "No parameters");
    assert_eq!(def.parameters, json!({"type": "object", "properties": {}}));
    assert_eq!(tool.call(json!({})).await.unwrap(), json!("done"));
}

#[test]
fn outcome_from_tool_value() {
    let text = ToolOutcome::from(Ok::<serde_json::Value, MembitError>(json!("1. A — b (metric: 3)")));
    assert_eq!(
        text,
        ToolOutcome::Ok {
            text: "1. A — b (metric: 3)".into()
        }
    );

    let object = ToolOutcome::from(Ok::<serde_json::Value, MembitError>(json!({"n": 1})));
    assert_eq!(object, ToolOutcome::Ok { text: "{\"n\":1}".into() });

    let failed = ToolOutcome::from(Err::<serde_json::Value, _>(MembitError::ToolNotFound(
        "membit_search_trends".into(),
    )));
    assert_eq!(
        failed,
        ToolOutcome::Failed {
            kind: ErrorKind::ToolNotFound,
            message: "tool not found: membit_search_trends".into(),
        }
    );
}
