// src/job_analysis/response_parser.rs
//! Best-effort recovery of a JSON object from free-form model output

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("object pattern is valid"));

/// Remove markdown code fence markers anywhere in the text
pub fn strip_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Span from the first `{` to the last `}`
pub fn extract_object(text: &str) -> Option<&str> {
    OBJECT_RE.find(text).map(|m| m.as_str())
}

/// Strict JSON first, then a Python-literal rewrite. Only objects count.
pub fn parse_object(text: &str) -> Option<Value> {
    let cleaned = strip_fences(text);
    let candidate = extract_object(&cleaned)?;

    let value = serde_json::from_str::<Value>(candidate).ok().or_else(|| {
        python_literal_to_json(candidate).and_then(|json| serde_json::from_str(&json).ok())
    })?;

    value.is_object().then_some(value)
}

/// Rewrite a Python dict literal into JSON: single-quoted strings,
/// True/False/None, tuples and trailing commas.
pub fn python_literal_to_json(literal: &str) -> Option<String> {
    let chars: Vec<char> = literal.chars().collect();
    let mut out = String::with_capacity(literal.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' => {
                i = copy_single_quoted(&chars, i + 1, &mut out)?;
            }
            '"' => {
                i = copy_double_quoted(&chars, i, &mut out)?;
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some('}') | Some(']') | Some(')')) {
                    out.push(',');
                }
                i += 1;
            }
            '(' => {
                out.push('[');
                i += 1;
            }
            ')' => {
                out.push(']');
                i += 1;
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                out.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    other => other,
                });
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    Some(out)
}

/// Copies a single-quoted body starting after the opening quote, returns the
/// index after the closing quote
fn copy_single_quoted(chars: &[char], mut i: usize, out: &mut String) -> Option<usize> {
    out.push('"');
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let next = *chars.get(i + 1)?;
                if next == '\'' {
                    out.push('\'');
                } else {
                    out.push('\\');
                    out.push(next);
                }
                i += 2;
            }
            '\'' => {
                out.push('"');
                return Some(i + 1);
            }
            '"' => {
                out.push_str("\\\"");
                i += 1;
            }
            '\n' => {
                out.push_str("\\n");
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    None
}

fn copy_double_quoted(chars: &[char], mut i: usize, out: &mut String) -> Option<usize> {
    out.push('"');
    i += 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                out.push('\\');
                out.push(*chars.get(i + 1)?);
                i += 2;
            }
            '"' => {
                out.push('"');
                return Some(i + 1);
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    None
}
