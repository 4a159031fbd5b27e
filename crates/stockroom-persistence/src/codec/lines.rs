//! Delimited line format: `key|name|quantity|price`, one record per line.

use stockroom_models::{Record, FIELD_COUNT};

use super::{Decoded, EntryLocation, RecordCodec};
use crate::error::{PersistenceError, Result};

const DELIMITER: char = '|';

/// Codec for the `|`-delimited line format.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineCodec;

impl RecordCodec for LineCodec {
    fn encode(&self, records: &[Record]) -> Result<String> {
        let mut out = String::new();
        for record in records {
            let fields = record.to_fields();
            if let Some(field) = fields
                .iter()
                .find(|f| f.contains(|c: char| c == DELIMITER || c == '\n' || c == '\r'))
            {
                return Err(PersistenceError::InvalidData(format!(
                    "record '{}': field {:?} contains '|' or a line break",
                    record.key(),
                    field
                )));
            }
            out.push_str(&fields.join("|"));
            out.push('\n');
        }
        Ok(out)
    }

    fn decode(&self, contents: &str) -> Result<Decoded> {
        let mut decoded = Decoded::default();

        for (index, line) in contents.lines().enumerate() {
            let location = EntryLocation::Line(index + 1);
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(DELIMITER).collect();
            if fields.len() != FIELD_COUNT {
                decoded.skipped.push((
                    location,
                    format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
                ));
                continue;
            }

            match Record::from_fields(&fields) {
                Ok(record) => decoded.entries.push((location, record)),
                Err(e) => decoded.skipped.push((location, e.to_string())),
            }
        }

        Ok(decoded)
    }
}
