// Parse text as JSON and turn parser diagnostics into guidance
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use shared::models::{JsonErrorKind, JsonValidationResult};
use std::sync::OnceLock;

pub const EMPTY_INPUT: &str = "JSON input is empty";

/// Deepest array/object nesting accepted. The parser itself has no limit;
/// this bound keeps parsing and every recursive walk over the document
/// within a thread's stack.
pub const MAX_NESTING_DEPTH: usize = 512;

pub fn validate(text: &str) -> JsonValidationResult {
    if text.trim().is_empty() {
        return JsonValidationResult::invalid(EMPTY_INPUT, JsonErrorKind::Empty);
    }
    if let Some((line, column)) = exceeds_nesting_limit(text) {
        tracing::debug!(line, column, limit = MAX_NESTING_DEPTH, "JSON input nested too deeply");
        return JsonValidationResult::invalid(
            format!("JSON is nested deeper than {} levels", MAX_NESTING_DEPTH),
            JsonErrorKind::Other,
        )
        .at(Some(line), Some(column));
    }

    match parse(text) {
        Ok(parsed) => JsonValidationResult::valid(parsed),
        Err(err) => {
            let diagnostic = err.to_string();
            let (line, column) = locate(&diagnostic, text);
            let kind = classify(&diagnostic, offending_char(text, line, column));
            tracing::debug!(
                diagnostic = %diagnostic,
                ?kind,
                line = ?line,
                column = ?column,
                "JSON input rejected"
            );
            JsonValidationResult::invalid(humanize(kind, &diagnostic), kind).at(line, column)
        }
    }
}

fn parse(text: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Line and byte column of the first bracket that opens a level beyond
/// [`MAX_NESTING_DEPTH`]. Brackets inside strings are not counted.
fn exceeds_nesting_limit(text: &str) -> Option<(usize, usize)> {
    let (mut depth, mut in_string, mut escaped) = (0usize, false, false);
    let (mut line, mut line_start) = (1, 0);
    for (index, c) in text.char_indices() {
        if c == '\n' {
            line += 1;
            line_start = index + 1;
        }
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return Some((line, index - line_start + 1));
                }
            }
            ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Pulls `line N`, `column N` and `position N` out of a diagnostic.
///
/// An explicit column wins; otherwise a position (a byte offset into
/// `input`) is converted to a line and column.
pub fn locate(diagnostic: &str, input: &str) -> (Option<usize>, Option<usize>) {
    static LOCATION: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(pattern) = LOCATION
        .get_or_init(|| Regex::new(r"(?i)\b(line|column|position) (\d+)").ok())
        .as_ref()
    else {
        return (None, None);
    };

    let (mut line, mut column, mut position) = (None, None, None);
    for caps in pattern.captures_iter(diagnostic) {
        let number = caps[2].parse::<usize>().ok();
        match caps[1].to_lowercase().as_str() {
            "line" if line.is_none() => line = number,
            "column" if column.is_none() => column = number,
            "position" if position.is_none() => position = number,
            _ => {}
        }
    }

    match (column, position) {
        (Some(_), _) => (line, column),
        (None, Some(offset)) => {
            let (l, c) = position_to_line_column(input, offset);
            (Some(l), Some(c))
        }
        (None, None) => (line, None),
    }
}

/// 1-based line and byte column of byte offset `position`, matching the
/// byte columns the parser reports.
pub fn position_to_line_column(input: &str, position: usize) -> (usize, usize) {
    let prefix = &input.as_bytes()[..position.min(input.len())];
    let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = prefix.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    (line, prefix.len() - line_start + 1)
}

fn offending_char(input: &str, line: Option<usize>, column: Option<usize>) -> Option<char> {
    let text = input.lines().nth(line?.checked_sub(1)?)?;
    text.get(column?.checked_sub(1)?..)?.chars().next()
}

pub fn classify(diagnostic: &str, offending: Option<char>) -> JsonErrorKind {
    let lower = diagnostic.to_lowercase();
    let token_like = lower.contains("unexpected token")
        || lower.starts_with("expected")
        || lower.contains("key must be a string")
        || lower.contains("trailing characters")
        || lower.contains("invalid")
        || lower.contains("control character")
        || lower.contains("while parsing a string");

    if token_like {
        if offending == Some('\'') || lower.contains('\'') {
            return JsonErrorKind::SingleQuotes;
        }
        if lower.contains("undefined") || lower.contains("while parsing a string") {
            return JsonErrorKind::MissingClosing;
        }
        return JsonErrorKind::UnexpectedCharacter;
    }
    if lower.contains("unexpected end") || lower.contains("eof while parsing") {
        return JsonErrorKind::Incomplete;
    }
    if lower.contains("trailing comma") {
        return JsonErrorKind::TrailingComma;
    }
    if lower.contains("duplicate") {
        return JsonErrorKind::DuplicateKey;
    }
    JsonErrorKind::Other
}

pub fn humanize(kind: JsonErrorKind, diagnostic: &str) -> String {
    let message = match kind {
        JsonErrorKind::Empty => EMPTY_INPUT,
        JsonErrorKind::SingleQuotes => {
            "Invalid character found. Make sure to use double quotes (\") for strings, not single quotes (')."
        }
        JsonErrorKind::MissingClosing => {
            "Unexpected end of JSON input. Check for missing closing brackets or quotes."
        }
        JsonErrorKind::UnexpectedCharacter => {
            "Unexpected character found. Check for missing commas, quotes, or brackets."
        }
        JsonErrorKind::Incomplete => {
            "JSON is incomplete. Check for missing closing brackets, braces, or quotes."
        }
        JsonErrorKind::TrailingComma => "Remove the trailing comma before closing brackets or braces.",
        JsonErrorKind::DuplicateKey => "Duplicate property names are not allowed in JSON objects.",
        JsonErrorKind::Other => diagnostic,
    };
    message.to_string()
}
