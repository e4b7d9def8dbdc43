// Serialize parsed JSON back to text
use crate::error::{EngineError, Result};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};
use serde_json::{Number, Value};
use shared::models::JsonFormatOptions;
use std::io;

// Indentation wider than this is clamped, as browsers do.
const MAX_INDENT: usize = 10;

pub fn format(value: &Value, options: &JsonFormatOptions) -> Result<String> {
    let sorted;
    let target = if options.sort_keys {
        sorted = sort_keys(value);
        &sorted
    } else {
        value
    };

    serialize(target, options.indent).map_err(|e| EngineError::FormattingError {
        action: "format",
        message: e.to_string(),
    })
}

pub fn minify(value: &Value) -> Result<String> {
    serialize(value, 0).map_err(|e| EngineError::FormattingError {
        action: "minify",
        message: e.to_string(),
    })
}

/// Copy of `value` with every object's keys in lexicographic order.
/// Array order is left alone.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            Value::Object(
                keys.into_iter()
                    .map(|key| (key.clone(), sort_keys(&map[key])))
                    .collect(),
            )
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}

pub(crate) fn serialize(value: &Value, indent: usize) -> serde_json::Result<String> {
    let indent = indent.min(MAX_INDENT);
    let mut buffer = Vec::new();
    if indent == 0 {
        write_with(&mut buffer, value, CompactFormatter)?;
    } else {
        let spaces = " ".repeat(indent);
        write_with(&mut buffer, value, PrettyFormatter::with_indent(spaces.as_bytes()))?;
    }
    String::from_utf8(buffer).map_err(serde::ser::Error::custom)
}

fn write_with<F: Formatter>(buffer: &mut Vec<u8>, value: &Value, formatter: F) -> serde_json::Result<()> {
    let mut serializer = Serializer::with_formatter(buffer, ScriptNumbers(formatter));
    value.serialize(&mut serializer)
}

/// Number text as browsers print it: `1000` rather than `1000.0`, and
/// `1e+21` rather than `1e21`.
pub(crate) fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => float_text(float),
        _ => number.to_string(),
    }
}

fn float_text(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&value.abs()) {
        return value.to_string();
    }
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
        _ => text,
    }
}

// Delegates layout to the wrapped formatter and only rewrites floats.
struct ScriptNumbers<F>(F);

impl<F: Formatter> Formatter for ScriptNumbers<F> {
    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        if !value.is_finite() {
            return self.0.write_f64(writer, value);
        }
        writer.write_all(float_text(value).as_bytes())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}
