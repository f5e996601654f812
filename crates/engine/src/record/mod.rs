//! Character document boundary.
//!
//! The character sheet is a loosely structured JSON document whose format has
//! drifted over time. This module is the only place that looks at its raw
//! shape:
//!
//! - `class_sources` - folds every class/level layout into `ClassLevels`
//! - `slot_fields` - reads and writes the persisted slot fields
//!
//! Everything past this boundary works on validated domain types.

mod class_sources;
mod slot_fields;

pub use class_sources::ClassLevelAggregator;
pub use slot_fields::{
    read_slot_state, write_slot_state, PACT_SLOTS_CURRENT, PACT_SLOTS_MAX, PACT_SLOT_LEVEL,
    SPELL_SLOTS_CURRENT, SPELL_SLOTS_MAX,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A character document, updated in place.
///
/// Fields the engine does not own round-trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterRecord(Map<String, Value>);

impl CharacterRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a parsed document. Anything but a JSON object becomes an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            other => {
                tracing::debug!(kind = %json_kind(&other), "Character document is not an object");
                Self::default()
            }
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }
}

impl From<Value> for CharacterRecord {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<CharacterRecord> for Value {
    fn from(record: CharacterRecord) -> Self {
        record.into_value()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Lenient integer read: JSON integers, floats (truncated) and numeric strings.
pub(crate) fn loose_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

/// Lenient text read: non-blank strings only.
pub(crate) fn loose_text(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}
