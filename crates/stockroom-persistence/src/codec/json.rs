//! JSON array format.

use serde_json::Value;
use stockroom_models::Record;

use super::{Decoded, EntryLocation, RecordCodec};
use crate::error::{PersistenceError, Result};

/// Codec for a pretty-printed JSON array of record objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl RecordCodec for JsonCodec {
    fn encode(&self, records: &[Record]) -> Result<String> {
        // serde_json writes non-finite floats as null
        if let Some(record) = records.iter().find(|r| !r.unit_price().is_finite()) {
            return Err(PersistenceError::InvalidData(format!(
                "record '{}' has a non-finite price ({})",
                record.key(),
                record.unit_price()
            )));
        }

        let mut json = serde_json::to_string_pretty(records)?;
        json.push('\n');
        Ok(json)
    }

    fn decode(&self, contents: &str) -> Result<Decoded> {
        let mut decoded = Decoded::default();

        // An empty file is an empty inventory
        if contents.trim().is_empty() {
            return Ok(decoded);
        }

        let items = match serde_json::from_str::<Value>(contents) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                return Err(PersistenceError::Malformed(format!(
                    "expected a JSON array, found {}",
                    value_kind(&other)
                )))
            }
            Err(e) => return Err(PersistenceError::Malformed(e.to_string())),
        };

        for (index, item) in items.into_iter().enumerate() {
            let location = EntryLocation::Index(index);
            match serde_json::from_value::<Record>(item) {
                Ok(record) => decoded.entries.push((location, record)),
                Err(e) => decoded.skipped.push((location, e.to_string())),
            }
        }

        Ok(decoded)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
