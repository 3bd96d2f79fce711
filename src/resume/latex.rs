// src/resume/latex.rs
//! LaTeX escaping for model-generated text

use serde_json::Value;

/// Escape reserved characters in a single pass, so the braces emitted for
/// `~` and `^` are never escaped again. Backslashes pass through.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            other => out.push(other),
        }
    }
    out
}

/// Plain text of a scalar: strings as-is, everything else as JSON
pub fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Escaped text for a loosely typed value: lists are space-joined,
/// objects join their values with " - "
pub fn flatten(value: &Value) -> String {
    match value {
        Value::Array(items) => join_escaped(items, " "),
        Value::Object(map) => map
            .values()
            .map(|v| match v {
                Value::Array(items) => join_escaped(items, " "),
                other => escape(&plain(other)),
            })
            .collect::<Vec<_>>()
            .join(" - "),
        other => escape(&plain(other)),
    }
}

fn join_escaped(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(|item| escape(&plain(item)))
        .collect::<Vec<_>>()
        .join(separator)
}
