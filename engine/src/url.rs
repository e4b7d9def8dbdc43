// URL component encoding and decoding
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use shared::models::{UrlMode, UrlProcessResult};

pub const EMPTY_INPUT: &str = "Input cannot be empty";
pub const MALFORMED_INPUT: &str =
    "Failed to decode URL. Input may be malformed or contain invalid characters.";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode(input: &str) -> UrlProcessResult {
    if input.trim().is_empty() {
        return UrlProcessResult::err(EMPTY_INPUT);
    }
    UrlProcessResult::ok(utf8_percent_encode(input, URI_COMPONENT).to_string())
}

pub fn decode(input: &str) -> UrlProcessResult {
    if input.trim().is_empty() {
        return UrlProcessResult::err(EMPTY_INPUT);
    }
    if !has_valid_escapes(input) {
        tracing::debug!(input, "Rejected malformed percent escape");
        return UrlProcessResult::err(MALFORMED_INPUT);
    }
    match percent_decode_str(input).decode_utf8() {
        Ok(decoded) => UrlProcessResult::ok(decoded.into_owned()),
        Err(e) => {
            tracing::debug!(error = %e, "Percent escapes do not form UTF-8");
            UrlProcessResult::err(MALFORMED_INPUT)
        }
    }
}

pub fn process(input: &str, mode: UrlMode) -> UrlProcessResult {
    match mode {
        UrlMode::Encode => encode(input),
        UrlMode::Decode => decode(input),
    }
}

// The decoder passes stray `%` through untouched, so check escapes first.
fn has_valid_escapes(input: &str) -> bool {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let pair = bytes.get(i + 1..i + 3);
            if !pair.is_some_and(|p| p.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
