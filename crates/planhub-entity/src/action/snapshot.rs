//! Snapshot value type and its storage codec.
//!
//! A snapshot is a sparse field map capturing part of an entity's state at
//! one point in time. It is stored as serialized JSON text and parsed back
//! on read. Absence of a snapshot is represented as `Option::None` all the
//! way down to the `NULL` column value; it is never collapsed into an empty
//! object, because "no snapshot" disables a replay direction while an empty
//! snapshot replays as a no-op patch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use planhub_core::{AppError, AppResult};

/// A sparse field map for one entity at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(pub Map<String, Value>);

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Whether the snapshot carries no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize for storage as a text column.
    pub fn encode(&self) -> AppResult<String> {
        serde_json::to_string(&self.0).map_err(AppError::from)
    }

    /// Parse a stored text column back into a snapshot.
    ///
    /// Rejects stored values that are not JSON objects; field maps are the
    /// only shape the mutators can apply.
    pub fn decode(raw: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(AppError::validation(format!(
                "Snapshot must be a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Serialize an optional snapshot, preserving absence as absence.
    pub fn encode_opt(snapshot: Option<&Snapshot>) -> AppResult<Option<String>> {
        snapshot.map(Snapshot::encode).transpose()
    }

    /// Parse an optional stored column, preserving absence as absence.
    pub fn decode_opt(raw: Option<&str>) -> AppResult<Option<Snapshot>> {
        raw.map(Snapshot::decode).transpose()
    }

    /// View the snapshot as a plain JSON value (for API responses).
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: Value) -> Snapshot {
        match value {
            Value::Object(map) => Snapshot(map),
            _ => panic!("test snapshot must be an object"),
        }
    }

    #[test]
    fn test_round_trip() {
        let snap = snapshot(json!({"status": "todo", "position": 3}));
        let encoded = snap.encode().unwrap();
        let decoded = Snapshot::decode(&encoded).unwrap();
        assert_eq!(decoded, snap);
    }

    #[test]
    fn test_absence_is_preserved() {
        assert_eq!(Snapshot::encode_opt(None).unwrap(), None);
        assert_eq!(Snapshot::decode_opt(None).unwrap(), None);
    }

    #[test]
    fn test_empty_is_not_absent() {
        let encoded = Snapshot::encode_opt(Some(&Snapshot::new())).unwrap();
        assert_eq!(encoded.as_deref(), Some("{}"));
        let decoded = Snapshot::decode_opt(encoded.as_deref()).unwrap();
        assert_eq!(decoded, Some(Snapshot::new()));
        assert!(decoded.unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        assert!(Snapshot::decode("[1, 2]").is_err());
        assert!(Snapshot::decode("\"status\"").is_err());
        assert!(Snapshot::decode("not json").is_err());
    }
}
