use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::HandlerError;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Request body formats the handler can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Csv,
    Json,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => CSV_CONTENT_TYPE,
            Self::Json => JSON_CONTENT_TYPE,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media-type parameters such as `; charset=utf-8` are ignored.
impl FromStr for ContentType {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let media_type = s.split(';').next().unwrap_or_default().trim();
        if media_type.eq_ignore_ascii_case(CSV_CONTENT_TYPE) {
            Ok(Self::Csv)
        } else if media_type.eq_ignore_ascii_case(JSON_CONTENT_TYPE) {
            Ok(Self::Json)
        } else {
            Err(HandlerError::UnsupportedContentType(s.to_string()))
        }
    }
}

/// Decode a request body into pipeline input.
///
/// CSV bodies become an array with one string per line, split on every
/// Unicode line boundary (see [`split_lines`]). JSON bodies yield
/// the `inputs` member when the document is an object that has one, and
/// the whole document otherwise.
pub fn input_fn(body: &[u8], content_type: ContentType) -> Result<Value, HandlerError> {
    match content_type {
        ContentType::Csv => {
            let text = std::str::from_utf8(body)?;
            Ok(Value::Array(
                split_lines(text)
                    .map(|l| Value::String(l.to_string()))
                    .collect(),
            ))
        }
        ContentType::Json => {
            let mut doc: Value = serde_json::from_slice(body)?;
            if let Some(inputs) = doc.as_object_mut().and_then(|o| o.remove("inputs")) {
                return Ok(inputs);
            }
            Ok(doc)
        }
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split on `\n`, `\r\n`, a lone `\r`, vertical tab, form feed, the
/// `\x1c`-`\x1e` separators, NEL, and U+2028/U+2029. A terminator at the end
/// of the text does not produce a trailing empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((idx, c)) => {
                let line = &rest[..idx];
                let mut next = idx + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                rest = &rest[next..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}
