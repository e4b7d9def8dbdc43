// Small helpers around the JSON viewer: heuristics, escaping, sample data
use super::formatter::{number_text, serialize};
use super::validator::validate;
use serde_json::{json, Value};
use std::str::FromStr;

/// Cheap guess at whether pasted text is a JSON document worth reformatting.
pub fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

/// Re-indents pasted text when it looks like JSON and parses; anything else
/// comes back untouched.
pub fn reformat_if_json(text: &str, indent: usize) -> String {
    if !looks_like_json(text) {
        return text.to_string();
    }
    validate(text)
        .parsed
        .and_then(|value| serialize(&value, indent).ok())
        .unwrap_or_else(|| text.to_string())
}

pub fn escape_json_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Simple,
    Complex,
}

impl FromStr for SampleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(SampleKind::Simple),
            "complex" => Ok(SampleKind::Complex),
            other => Err(format!("Unknown sample: {}", other)),
        }
    }
}

pub fn sample(kind: SampleKind) -> Value {
    match kind {
        SampleKind::Simple => json!({
            "name": "John Doe",
            "age": 30,
            "isActive": true,
            "email": "john@example.com"
        }),
        SampleKind::Complex => json!({
            "user": {
                "id": 1,
                "name": "John Doe",
                "email": "john@example.com",
                "address": {
                    "street": "123 Main St",
                    "city": "New York",
                    "zipCode": "10001",
                    "coordinates": { "lat": 40.7128, "lng": -74.0060 }
                },
                "hobbies": ["reading", "swimming", "coding"],
                "preferences": { "theme": "dark", "notifications": true, "language": "en" }
            },
            "posts": [
                {
                    "id": 1,
                    "title": "First Post",
                    "content": "This is my first post!",
                    "tags": ["intro", "hello"],
                    "publishedAt": "2024-01-15T10:30:00Z"
                },
                {
                    "id": 2,
                    "title": "JSON Tutorial",
                    "content": "Learn JSON basics...",
                    "tags": ["tutorial", "json", "programming"],
                    "publishedAt": "2024-01-20T14:15:00Z"
                }
            ],
            "metadata": {
                "version": "1.0.0",
                "lastUpdated": "2024-01-25T09:00:00Z",
                "features": { "darkMode": true, "notifications": true, "analytics": false }
            }
        }),
    }
}

/// Collapsible-tree view flattened to an indented outline.
pub fn tree(value: &Value) -> String {
    let mut lines = Vec::new();
    walk(None, value, 0, &mut lines);
    lines.join("\n")
}

fn walk(label: Option<&str>, value: &Value, depth: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(depth);
    let prefix = label.map(|l| format!("{}: ", l)).unwrap_or_default();
    match value {
        Value::Array(items) => {
            lines.push(format!("{}{}[{} items]", pad, prefix, items.len()));
            for (index, item) in items.iter().enumerate() {
                walk(Some(index.to_string().as_str()), item, depth + 1, lines);
            }
        }
        Value::Object(map) => {
            lines.push(format!("{}{}{{{} keys}}", pad, prefix, map.len()));
            for (key, child) in map {
                walk(Some(key.as_str()), child, depth + 1, lines);
            }
        }
        Value::Number(number) => lines.push(format!("{}{}{}", pad, prefix, number_text(number))),
        Value::Null | Value::Bool(_) | Value::String(_) => {
            lines.push(format!("{}{}{}", pad, prefix, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_json() {
        assert!(looks_like_json("  {\"a\": 1}\n"));
        assert!(looks_like_json("[1, 2]"));
        assert!(looks_like_json("{not json}"));
        assert!(!looks_like_json("hello"));
        assert!(!looks_like_json("{\"a\": 1"));
        assert!(!looks_like_json("[}"));
    }

    #[test]
    fn test_reformat_if_json() {
        assert_eq!(reformat_if_json("{\"a\":1}", 2), "{\n  \"a\": 1\n}");
        assert_eq!(reformat_if_json("{not json}", 2), "{not json}");
        assert_eq!(reformat_if_json("plain", 2), "plain");
    }

    #[test]
    fn test_reformat_handles_deeply_nested_paste() {
        let text = format!("{}{}", "[".repeat(200), "]".repeat(200));
        let formatted = reformat_if_json(&text, 2);
        assert!(formatted.starts_with("[\n  [\n    ["));
        assert_eq!(formatted.lines().count(), 399);
    }

    #[test]
    fn test_tree_prints_whole_floats_without_fraction() {
        assert_eq!(tree(&json!({"n": 1e3, "x": 0.5})), "{2 keys}\n  n: 1000\n  x: 0.5");
    }

    #[test]
    fn test_escape_json_string() {
        assert_eq!(escape_json_string("a\"b\\c\nd\re\tf"), "a\\\"b\\\\c\\nd\\re\\tf");
        assert_eq!(escape_json_string("plain"), "plain");
    }

    #[test]
    fn test_samples_validate() {
        for kind in [SampleKind::Simple, SampleKind::Complex] {
            let text = serde_json::to_string_pretty(&sample(kind)).unwrap();
            assert!(validate(&text).is_valid);
        }
        assert_eq!("Complex".parse::<SampleKind>(), Ok(SampleKind::Complex));
        assert!("huge".parse::<SampleKind>().is_err());
    }

    #[test]
    fn test_tree_outline() {
        let value = json!({"a": 1, "b": [true, null], "c": {"d": "x"}});
        let expected = "\
{3 keys}
  a: 1
  b: [2 items]
    0: true
    1: null
  c: {1 keys}
    d: \"x\"";
        assert_eq!(tree(&value), expected);
    }
}
