// Aggregate counts over a parsed JSON document
use super::formatter::serialize;
use serde_json::Value;
use shared::models::JsonStats;

pub fn stats(value: &Value) -> JsonStats {
    let mut stats = JsonStats {
        size: serialize(value, 0).map_or(0, |text| text.chars().count()),
        lines: serialize(value, 2).map_or(0, |text| text.split('\n').count()),
        ..JsonStats::default()
    };
    traverse(value, &mut stats);
    stats
}

fn traverse(value: &Value, stats: &mut JsonStats) {
    match value {
        Value::Null => stats.nulls += 1,
        Value::Bool(_) => stats.booleans += 1,
        Value::Number(_) => stats.numbers += 1,
        Value::String(_) => stats.strings += 1,
        Value::Array(items) => {
            stats.arrays += 1;
            for item in items {
                traverse(item, stats);
            }
        }
        Value::Object(map) => {
            stats.objects += 1;
            for child in map.values() {
                stats.keys += 1;
                traverse(child, stats);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mixed_document() {
        let result = stats(&json!({"a": 1, "b": [1, 2], "c": {"d": null}}));
        assert_eq!(result.objects, 2);
        assert_eq!(result.arrays, 1);
        assert_eq!(result.numbers, 3);
        assert_eq!(result.nulls, 1);
        assert_eq!(result.keys, 4);
        assert_eq!(result.strings, 0);
        assert_eq!(result.booleans, 0);
        assert_eq!(result.size, r#"{"a":1,"b":[1,2],"c":{"d":null}}"#.len());
        assert_eq!(result.lines, 10);
    }

    #[test]
    fn test_scalar_document() {
        let result = stats(&json!("hello"));
        assert_eq!(result.strings, 1);
        assert_eq!(result.lines, 1);
        assert_eq!(result.size, 7);
    }

    #[test]
    fn test_arrays_are_not_objects() {
        let result = stats(&json!([[], [true, false], {}]));
        assert_eq!(result.arrays, 3);
        assert_eq!(result.objects, 1);
        assert_eq!(result.booleans, 2);
        assert_eq!(result.keys, 0);
    }

    #[test]
    fn test_size_uses_browser_number_text() {
        assert_eq!(stats(&json!({"b": 1e3})).size, r#"{"b":1000}"#.len());
    }

    #[test]
    fn test_deeply_nested_document() {
        let text = format!("{}{}", "[".repeat(200), "]".repeat(200));
        let parsed = crate::json::validate(&text).parsed.unwrap();
        let result = stats(&parsed);
        assert_eq!(result.arrays, 200);
        assert_eq!(result.size, 400);
        assert_eq!(result.lines, 399);
    }

    #[test]
    fn test_size_counts_characters() {
        let result = stats(&json!("é"));
        assert_eq!(result.size, 3);
    }
}
