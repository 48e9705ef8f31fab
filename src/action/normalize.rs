//! Lenient decoding of action arguments produced by an LLM.
//!
//! Models hand back ids as numbers, JSON strings, Python-style lists or
//! comma-separated text, sometimes wrapped in code fences.

use serde_json::{Map, Value};

use crate::action::executor::TypeEntry;
use crate::error::PerceptionError;

fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("```") {
            // ```json etc.
            if rest.chars().all(|c| c.is_ascii_alphanumeric()) {
                continue;
            }
        }
        out.push_str(line);
        out.push('\n');
    }
    out.replace("```", "").trim().to_string()
}

/// Parse JSON, retrying with single quotes swapped for double quotes.
fn parse_loose_json(text: &str) -> Option<Value> {
    serde_json::from_str(text)
        .ok()
        .or_else(|| serde_json::from_str(&text.replace('\'', "\"")).ok())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn normalize_ids(input: &Value) -> Vec<String> {
    match input {
        Value::Null => vec![],
        Value::Number(n) => vec![n.to_string()],
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(raw) => {
            let text = strip_fences(raw);
            if text.is_empty() {
                return vec![];
            }

            if let Some(parsed @ (Value::Array(_) | Value::Number(_))) = parse_loose_json(&text) {
                return normalize_ids(&parsed);
            }

            if text.contains(',') {
                return text
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }

            vec![text]
        }
        _ => vec![],
    }
}

pub fn normalize_entries(input: &Value) -> Result<Vec<TypeEntry>, PerceptionError> {
    match input {
        Value::Null => Ok(vec![]),
        Value::Object(map) => Ok(entries_from_object(map)),
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|item| item.as_object().and_then(entry_from_object))
            .collect()),
        Value::String(raw) => {
            let text = strip_fences(raw);

            if let Some(parsed) = parse_loose_json(&text) {
                if !parsed.is_string() {
                    return normalize_entries(&parsed);
                }
            }

            if !text.contains(':') {
                return Err(PerceptionError::InvalidActionInput(text));
            }

            Ok(text
                .split(',')
                .filter_map(|pair| pair.split_once(':'))
                .map(|(k, v)| TypeEntry::new(k.trim(), v.trim()))
                .filter(|entry| !entry.element_id.is_empty())
                .collect())
        }
        other => Err(PerceptionError::InvalidActionInput(other.to_string())),
    }
}

/// Either a single `{element_id, text}` entry or an `{id: text}` map.
fn entries_from_object(map: &Map<String, Value>) -> Vec<TypeEntry> {
    if let Some(entry) = entry_from_object(map) {
        return vec![entry];
    }

    map.iter()
        .filter_map(|(k, v)| scalar_to_string(v).map(|text| TypeEntry::new(k.trim(), text)))
        .collect()
}

fn entry_from_object(map: &Map<String, Value>) -> Option<TypeEntry> {
    let id = map.get("element_id").and_then(scalar_to_string)?.trim().to_string();
    let text = map.get("text").and_then(scalar_to_string)?;
    Some(TypeEntry::new(id, text))
}
