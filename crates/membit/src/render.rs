//! Line rendering for search results.

use serde_json::Value;

use crate::extract::{resolve_field, value_text};

/// Hard cap on rendered post lines, whatever limit was requested.
pub const MAX_POST_LINES: usize = 8;

pub const NO_RESULTS: &str = "(no results)";

const POST_TITLE_KEYS: &[&str] = &["title", "name", "id"];
const POST_EXCERPT_KEYS: &[&str] = &["excerpt", "text", "summary"];
const POST_MENTION_KEYS: &[&str] = &["mentions"];

const CLUSTER_TITLE_KEYS: &[&str] = &["name", "title", "id"];
const CLUSTER_EXCERPT_KEYS: &[&str] = &["summary", "excerpt"];
const CLUSTER_METRIC_KEYS: &[&str] = &["score", "volume", "mentions"];

/// `"{n}. {title} — {excerpt} (mentions: {mentions})"` per item, at most
/// `max_items` lines. An empty list renders as [`NO_RESULTS`].
pub fn render_posts(items: &[Value], max_items: usize) -> String {
    let lines: Vec<String> = items
        .iter()
        .take(max_items)
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{}. {} — {} (mentions: {})",
                i + 1,
                resolve_field(item, POST_TITLE_KEYS, "(untitled)"),
                resolve_field(item, POST_EXCERPT_KEYS, ""),
                resolve_field(item, POST_MENTION_KEYS, ""),
            )
        })
        .collect();

    if lines.is_empty() {
        NO_RESULTS.to_string()
    } else {
        lines.join("\n")
    }
}

/// `"{n}. {title} — {excerpt} (metric: {score})"` per item, at most
/// `max_items` lines. An empty list renders as an empty string.
pub fn render_clusters(items: &[Value], max_items: usize) -> String {
    items
        .iter()
        .take(max_items)
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{}. {} — {} (metric: {})",
                i + 1,
                resolve_field(item, CLUSTER_TITLE_KEYS, "(cluster)"),
                resolve_field(item, CLUSTER_EXCERPT_KEYS, ""),
                resolve_field(item, CLUSTER_METRIC_KEYS, ""),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fallback text for a payload with no recognizable result list.
pub fn payload_text(payload: &Value) -> String {
    value_text(payload)
}
