//! On-disk formats for the backing file.
//!
//! Both formats hold the whole inventory. Decoding is lenient: entries that
//! cannot be parsed are reported in [`Decoded::skipped`] instead of failing
//! the load.

mod json;
mod lines;

pub use json::JsonCodec;
pub use lines::LineCodec;

use std::fmt;
use std::path::Path;

use stockroom_models::Record;

use crate::error::Result;

/// Position of an entry inside the backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryLocation {
    /// 1-based line number (line format).
    Line(usize),
    /// 0-based array index (JSON format).
    Index(usize),
}

impl fmt::Display for EntryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryLocation::Line(n) => write!(f, "line {}", n),
            EntryLocation::Index(i) => write!(f, "entry {}", i),
        }
    }
}

/// Result of decoding a backing file.
#[derive(Debug, Default)]
pub struct Decoded {
    /// Successfully parsed records, in file order.
    pub entries: Vec<(EntryLocation, Record)>,
    /// Entries that could not be parsed, with the reason.
    pub skipped: Vec<(EntryLocation, String)>,
}

/// Serialization strategy for a whole inventory.
pub trait RecordCodec {
    /// Encodes all records into the file contents.
    fn encode(&self, records: &[Record]) -> Result<String>;

    /// Decodes file contents, skipping malformed entries.
    ///
    /// Only a file that is unusable as a whole is an error.
    fn decode(&self, contents: &str) -> Result<Decoded>;
}

/// Order in which [`Store::list_all`](crate::Store::list_all) returns records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Order of insertion (also the file order).
    Insertion,
    /// Ascending by key.
    ByKey,
}

/// Supported backing file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// One `key|name|quantity|price` line per record.
    #[default]
    Lines,
    /// A pretty-printed JSON array of record objects.
    Json,
}

impl Format {
    /// Picks the format from a file extension: `.json` is JSON, anything
    /// else uses the line format.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Lines,
        }
    }

    /// Returns the codec implementing this format.
    pub fn codec(self) -> &'static dyn RecordCodec {
        match self {
            Format::Lines => &LineCodec,
            Format::Json => &JsonCodec,
        }
    }

    /// Listing order used by stores of this format.
    ///
    /// JSON inventories list by key; line inventories keep insertion order.
    pub fn list_order(self) -> ListOrder {
        match self {
            Format::Lines => ListOrder::Insertion,
            Format::Json => ListOrder::ByKey,
        }
    }

    /// Conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Lines => "txt",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Lines => write!(f, "lines"),
            Format::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("inventory.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("/data/STOCK.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("inventory.txt")), Format::Lines);
        assert_eq!(Format::from_path(Path::new("inventory")), Format::Lines);
    }

    #[test]
    fn test_list_order_per_format() {
        assert_eq!(Format::Json.list_order(), ListOrder::ByKey);
        assert_eq!(Format::Lines.list_order(), ListOrder::Insertion);
    }

    #[test]
    fn test_entry_location_display() {
        assert_eq!(EntryLocation::Line(3).to_string(), "line 3");
        assert_eq!(EntryLocation::Index(0).to_string(), "entry 0");
    }

    #[test]
    fn test_codecs_roundtrip_same_records() {
        let records = vec![
            Record::new("B2", "Nut", 100, 0.05),
            Record::new("A1", "Bolt", 10, 0.5),
        ];

        for format in [Format::Lines, Format::Json] {
            let codec = format.codec();
            let encoded = codec.encode(&records).unwrap();
            let decoded = codec.decode(&encoded).unwrap();

            let restored: Vec<Record> = decoded.entries.into_iter().map(|(_, r)| r).collect();
            assert_eq!(restored, records, "format {}", format);
            assert!(decoded.skipped.is_empty());
        }
    }
}
