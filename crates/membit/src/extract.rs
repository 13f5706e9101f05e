//! Shape-tolerant access to Membit JSON payloads.
//!
//! Membit does not pin down its response schema, so every lookup here is a
//! first-match-wins lookup over a list of candidate keys. None of these
//! functions fail; a missing value falls back to a default.

use serde_json::Value;

/// Keys tried for the result list of a `search-posts` response.
pub const POST_LIST_KEYS: &[&str] = &["results", "posts", "items", "data"];

/// Keys tried for the result list of a `search-clusters` response.
pub const CLUSTER_LIST_KEYS: &[&str] = &["clusters", "items", "results", "data"];

/// Find the result list in `payload`.
///
/// On an object, the first key in `keys` whose value is an array wins, even
/// an empty one. A bare array is returned as-is. Anything else yields `None`.
pub fn extract_list<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a [Value]> {
    match payload {
        Value::Array(items) => Some(items.as_slice()),
        Value::Object(map) => keys
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice),
        _ => None,
    }
}

/// Value of the first key in `keys` that is present, not null and not an
/// empty string.
pub fn first_present<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = record.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !is_blank(value))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Text of the first present field in `keys`, or `default`.
pub fn resolve_field(record: &Value, keys: &[&str], default: &str) -> String {
    first_present(record, keys)
        .map(value_text)
        .unwrap_or_else(|| default.to_string())
}

/// Strings verbatim, everything else as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
