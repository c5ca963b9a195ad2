//! Raw JSON to normalized record conversion.
//!
//! The az cli returns camelCase JSON. Records handed to the models use snake_case keys,
//! except below the opaque keys whose content is user or vendor data.

use crate::error::{CollectError, CollectResult};
use crate::models::Record;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Keys whose values are copied verbatim.
const OPAQUE_KEYS: [&str; 4] = ["tags", "config", "properties", "app_settings"];

static LOWER_UPPER: OnceLock<Regex> = OnceLock::new();
static ACRONYM: OnceLock<Regex> = OnceLock::new();

fn lower_upper_regex() -> &'static Regex {
    LOWER_UPPER.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("Invalid Regex"))
}

fn acronym_regex() -> &'static Regex {
    ACRONYM.get_or_init(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("Invalid Regex"))
}

/// Convert `serverFarmId` / `HTTPSOnly` style keys to snake_case.
///
/// Keys already in snake_case come back unchanged.
pub fn to_snake_case(key: &str) -> String {
    let key = acronym_regex().replace_all(key, "${1}_${2}");
    lower_upper_regex()
        .replace_all(&key, "${1}_${2}")
        .to_lowercase()
}

/// Recursively normalize a raw value.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut normalized = Record::new();
            for (k, v) in map {
                let key = to_snake_case(k);
                // `resourceGroup` and `resource_group` collapse to one key; the first one wins
                if normalized.contains_key(&key) {
                    log::warn!("Dropping '{}': '{}' is already set", k, key);
                    continue;
                }
                let v = if OPAQUE_KEYS.contains(&key.as_str()) {
                    v.clone()
                } else {
                    normalize(v)
                };
                normalized.insert(key, v);
            }
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize).collect()),
        scalar => scalar.clone(),
    }
}

/// Normalize a raw item that must be a JSON object.
pub fn normalize_record(value: &Value) -> CollectResult<Record> {
    match normalize(value) {
        Value::Object(map) => Ok(map),
        other => Err(CollectError::Model {
            model: "Record",
            path: ".".to_string(),
            message: format!("expected a JSON object, got {}", type_name(&other)),
        }),
    }
}

/// Required non-empty string field.
pub fn required_str<'a>(record: &'a Record, key: &str) -> CollectResult<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CollectError::MissingField(key.to_string()))
}

pub fn optional_str<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

/// Merge derived fields into a record.
///
/// `*_display` keys are always written, other keys only when the record lacks them.
pub fn merge_fields<I>(record: &mut Record, fields: I)
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    for (key, value) in fields {
        if key.ends_with("_display") {
            record.insert(key.to_string(), value);
        } else {
            record.entry(key).or_insert(value);
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
