//! Renderers for the individual fields of a text line
//!
//! Every function here is infallible: a missing attribute renders as `-`
//! rather than aborting the line.

use super::extras::FieldValue;
use super::log_record::LogRecord;
use super::project_root::relative_to_root;
use super::style::Style;
use colored::Color;
use std::path::Path;

/// Longest string value shown in text output before truncation
pub const STRING_MAX_LENGTH: usize = 100;

/// Placeholder for a field the record does not carry
pub const MISSING: &str = "-";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

const DATE_STYLE: Style = Style::new().dim();
const TIME_STYLE: Style = Style::new().dim();
const LOCATION_STYLE: Style = Style::new().color(Color::Cyan);
const MESSAGE_STYLE: Style = Style::new().bold();
const EXTRA_KEY_STYLE: Style = Style::new().color(Color::Green);

pub fn render_date(record: &LogRecord, colored: bool) -> String {
    DATE_STYLE.paint(&record.timestamp.format(DATE_FORMAT).to_string(), colored)
}

pub fn render_time(record: &LogRecord, colored: bool) -> String {
    TIME_STYLE.paint(&record.timestamp.format(TIME_FORMAT).to_string(), colored)
}

/// Level name in its level color, padded to `width`
pub fn render_level(record: &LogRecord, width: usize, colored: bool) -> String {
    Style::new()
        .color(record.level.color())
        .bold()
        .width(width)
        .paint(record.level.name(), colored)
}

/// `file:line`, with the file made relative to `root` when possible
pub fn render_location(record: &LogRecord, root: Option<&Path>, colored: bool) -> String {
    LOCATION_STYLE.paint(&location_text(record, root), colored)
}

/// Unstyled `file:line`, shared with the JSON formatter
pub fn location_text(record: &LogRecord, root: Option<&Path>) -> String {
    match (&record.file, record.line) {
        (Some(file), Some(line)) => format!("{}:{}", relative_to_root(file, root), line),
        (Some(file), None) => relative_to_root(file, root),
        (None, _) => MISSING.to_string(),
    }
}

pub fn render_function(record: &LogRecord) -> String {
    function_text(record)
}

/// Function name as `name()`; `<module>` stands for top-level code
pub fn function_text(record: &LogRecord) -> String {
    let name = match record.function.as_deref() {
        None | Some("") => return MISSING.to_string(),
        Some("<module>") => return "__".to_string(),
        Some(name) => name,
    };

    let name = name
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(name);
    format!("{}()", name)
}

pub fn render_message(record: &LogRecord, colored: bool) -> String {
    MESSAGE_STYLE.paint(&record.message, colored)
}

/// `key=value` pairs in insertion order, separated by one space
pub fn render_extras(record: &LogRecord, colored: bool) -> String {
    record
        .extras
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                EXTRA_KEY_STYLE.paint(&key_text(key), colored),
                value_text(value)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extra key with line breaks and tabs escaped
fn key_text(key: &str) -> String {
    key.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Textual form of an extra value
///
/// Strings are quoted only when they contain whitespace.
pub fn value_text(value: &FieldValue) -> String {
    let text = match value {
        FieldValue::Null => return "_NULL_".to_string(),
        FieldValue::String(s) if s.is_empty() => return "_EMPTY_".to_string(),
        FieldValue::Float(f) if f.is_nan() => return "_NAN_".to_string(),
        FieldValue::Float(f) if f.is_infinite() => {
            return if *f > 0.0 { "_INFINITY_" } else { "_-INFINITY_" }.to_string();
        }
        FieldValue::String(s) => truncate(s),
        FieldValue::Int(i) => i.to_string(),
        FieldValue::Float(f) => format!("{:?}", f),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Array(_) | FieldValue::Map(_) => truncate(&value.to_json_value().to_string()),
    };

    if text.chars().any(char::is_whitespace) {
        let escaped = text
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t");
        format!("\"{}\"", escaped)
    } else {
        text
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= STRING_MAX_LENGTH {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(STRING_MAX_LENGTH - 3).collect();
    truncated.push_str("...");
    truncated
}
