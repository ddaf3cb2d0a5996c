// ABOUTME: List-encoding adapter for string list columns
// ABOUTME: Normalizes JSON arrays, newline/comma separated text and bare strings

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Raw list input as sent by a client.
///
/// The JSON API sends arrays, the admin forms send a single text blob. Both
/// are accepted and normalized by [`normalize`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    List(Vec<Value>),
    Text(String),
}

impl From<Vec<String>> for ListInput {
    fn from(items: Vec<String>) -> Self {
        ListInput::List(items.into_iter().map(Value::String).collect())
    }
}

impl From<&str> for ListInput {
    fn from(text: &str) -> Self {
        ListInput::Text(text.to_string())
    }
}

impl From<String> for ListInput {
    fn from(text: String) -> Self {
        ListInput::Text(text)
    }
}

/// Canonicalize list input into trimmed, non-empty strings.
///
/// Precedence: list, JSON array text, newline separated, comma separated,
/// single value. Returns `None` when nothing meaningful remains.
pub fn normalize(input: ListInput) -> Option<Vec<String>> {
    let items = match input {
        ListInput::List(values) => from_values(values),
        ListInput::Text(text) => parse_text(&text),
    };

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Encode a canonical list for storage (`None` for empty)
pub fn encode(items: Option<Vec<String>>) -> Option<String> {
    match items {
        Some(items) if !items.is_empty() => {
            Some(Value::Array(items.into_iter().map(Value::String).collect()).to_string())
        }
        _ => None,
    }
}

/// Decode a stored column back into a list (`NULL` reads as empty)
pub fn decode(stored: Option<String>) -> Vec<String> {
    let Some(stored) = stored else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(&stored) {
        Ok(items) => items,
        Err(_) => {
            debug!("Stored list is not a JSON array, normalizing as text: {:?}", stored);
            normalize(ListInput::Text(stored)).unwrap_or_default()
        }
    }
}

fn parse_text(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    if let Ok(Value::Array(values)) = serde_json::from_str::<Value>(text) {
        debug!("Parsed list input as JSON array");
        return from_values(values);
    }

    if text.contains('\n') {
        debug!("Parsed list input as newline-separated text");
        return clean(text.split('\n').map(str::to_string));
    }

    if text.contains(',') {
        debug!("Parsed list input as comma-separated text");
        return clean(text.split(',').map(str::to_string));
    }

    vec![text.to_string()]
}

fn from_values(values: Vec<Value>) -> Vec<String> {
    clean(values.into_iter().filter_map(element_text))
}

/// Falsy JSON scalars (null, false, 0, "") are skipped
fn element_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn clean(items: impl Iterator<Item = String>) -> Vec<String> {
    items
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
