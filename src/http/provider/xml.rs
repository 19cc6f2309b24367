//! XML serialization of untyped payloads.
//!
//! Objects map to child elements named by key, arrays to repeated `<item>`
//! elements, scalars to escaped text and `null` to an empty element. Keys that
//! are not valid element names are rewritten rather than rejected.

use serde_json::Value;

use super::ResponseProvider;
use crate::http::error::ApiError;
use crate::http::format::FormatMode;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const ITEM: &str = "item";

/// Writes payloads as XML documents under a fixed root element.
#[derive(Debug, Clone)]
pub struct XmlProvider {
    root: String,
}

impl XmlProvider {
    pub fn new(root: &str) -> Self {
        Self {
            root: sanitize_name(root),
        }
    }
}

impl ResponseProvider for XmlProvider {
    fn format(&self) -> FormatMode {
        FormatMode::Xml
    }

    fn content_type(&self) -> &'static str {
        "application/xml; charset=utf-8"
    }

    fn serialize(&self, payload: &Value) -> Result<Vec<u8>, ApiError> {
        let mut out = String::from(DECLARATION);
        write_element(&mut out, &self.root, payload);
        Ok(out.into_bytes())
    }
}

fn write_element(out: &mut String, name: &str, value: &Value) {
    if value.is_null() {
        out.push('<');
        out.push_str(name);
        out.push_str("/>");
        return;
    }

    out.push('<');
    out.push_str(name);
    out.push('>');
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                write_element(out, &sanitize_name(key), child);
            }
        }
        Value::Array(items) => {
            for item in items {
                write_element(out, ITEM, item);
            }
        }
        Value::String(s) => escape_into(out, s),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Null => {}
    }
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Not representable in XML 1.0.
            c if !is_xml_char(c) => {}
            c => out.push(c),
        }
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_numeric() || c == '-' || c == '.'
}

/// Whether `name` can be used as an element name as-is.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start) && chars.all(is_name_char)
}

/// Rewrite `name` into a valid element name: invalid characters become `_`
/// and names that cannot start an element get a `_` prefix.
pub fn sanitize_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| if is_name_char(c) { c } else { '_' })
        .collect();
    if !sanitized.chars().next().is_some_and(is_name_start) {
        sanitized.insert(0, '_');
    }
    sanitized
}
