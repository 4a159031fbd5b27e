//! Inventory record type.
//!
//! A record is one inventory entry. Its key is fixed at creation; name,
//! quantity and unit price can change afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::FieldError;

/// Number of fields in the delimited representation of a record.
pub const FIELD_COUNT: usize = 4;

/// One inventory entry.
///
/// The JSON form uses the keys `id`, `name`, `quantity` and `price`. Files
/// written by older tools with `nombre`, `cantidad` and `precio`, or with a
/// numeric `id`, are still readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier chosen by the caller.
    #[serde(rename = "id", deserialize_with = "deserialize_key")]
    key: String,

    /// Display name, searched case-insensitively.
    #[serde(alias = "nombre")]
    name: String,

    /// Units in stock.
    #[serde(alias = "cantidad")]
    quantity: i64,

    /// Price of a single unit.
    #[serde(rename = "price", alias = "precio")]
    unit_price: f64,
}

impl Record {
    /// Creates a new record.
    pub fn new(key: impl Into<String>, name: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Sets the quantity without validation; see [`ValuePolicy`](crate::ValuePolicy).
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    /// Sets the unit price without validation; see [`ValuePolicy`](crate::ValuePolicy).
    pub fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = unit_price;
    }

    /// Case-insensitive substring match against the name.
    pub fn matches_name(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Returns the fields in fixed order: key, name, quantity, price.
    ///
    /// The price uses Rust's shortest round-trip float formatting, so
    /// [`Record::from_fields`] restores the exact value.
    pub fn to_fields(&self) -> [String; FIELD_COUNT] {
        [
            self.key.clone(),
            self.name.clone(),
            self.quantity.to_string(),
            self.unit_price.to_string(),
        ]
    }

    /// Rebuilds a record from exactly four fields.
    ///
    /// Numeric fields are trimmed before parsing; key and name are kept as is.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, FieldError> {
        let [key, name, quantity, price] = fields else {
            return Err(FieldError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        };

        let quantity = quantity.as_ref();
        let quantity: i64 = quantity
            .trim()
            .parse()
            .map_err(|_| FieldError::Quantity(quantity.to_string()))?;

        let price = price.as_ref();
        let unit_price: f64 = price
            .trim()
            .parse()
            .map_err(|_| FieldError::Price(price.to_string()))?;

        Ok(Self::new(key.as_ref(), name.as_ref(), quantity, unit_price))
    }
}

/// Accepts the key as a string or an integer.
fn deserialize_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKey {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawKey::deserialize(deserializer)? {
        RawKey::Text(key) => key,
        RawKey::Signed(n) => n.to_string(),
        RawKey::Unsigned(n) => n.to_string(),
    })
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | quantity: {} | price: ${:.2}",
            self.key, self.name, self.quantity, self.unit_price
        )
    }
}
