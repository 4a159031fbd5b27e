//! Partial updates for records.
//!
//! A [`RecordUpdate`] names which of quantity and price change. Fields left
//! as [`FieldUpdate::Keep`] are not touched.

use crate::record::Record;

/// Change to a single field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldUpdate<T> {
    /// Leave the current value.
    #[default]
    Keep,
    /// Replace the current value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, FieldUpdate::Keep)
    }

    /// Returns the new value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Keep => None,
            FieldUpdate::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Keep,
        }
    }
}

/// Quantity and price changes for one record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecordUpdate {
    pub quantity: FieldUpdate<i64>,
    pub unit_price: FieldUpdate<f64>,
}

impl RecordUpdate {
    /// Creates an update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new quantity.
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = FieldUpdate::Set(quantity);
        self
    }

    /// Sets the new unit price.
    pub fn unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = FieldUpdate::Set(unit_price);
        self
    }

    /// Returns true if neither field changes.
    pub fn is_empty(&self) -> bool {
        self.quantity.is_keep() && self.unit_price.is_keep()
    }

    /// Writes the changed fields into `record`.
    pub fn apply_to(&self, record: &mut Record) {
        if let FieldUpdate::Set(quantity) = self.quantity {
            record.set_quantity(quantity);
        }
        if let FieldUpdate::Set(unit_price) = self.unit_price {
            record.set_unit_price(unit_price);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_update_is_empty() {
        assert!(RecordUpdate::new().is_empty());
        assert!(!RecordUpdate::new().quantity(1).is_empty());
        assert!(!RecordUpdate::new().unit_price(1.0).is_empty());
    }

    #[test]
    fn test_apply_quantity_only() {
        let mut record = Record::new("A1", "Bolt", 10, 0.5);
        RecordUpdate::new().quantity(7).apply_to(&mut record);

        assert_eq!(record.quantity(), 7);
        assert_eq!(record.unit_price(), 0.5);
    }

    #[test]
    fn test_apply_both() {
        let mut record = Record::new("A1", "Bolt", 10, 0.5);
        RecordUpdate::new().quantity(3).unit_price(0.8).apply_to(&mut record);

        assert_eq!(record, Record::new("A1", "Bolt", 3, 0.8));
    }

    #[test]
    fn test_apply_empty_changes_nothing() {
        let mut record = Record::new("A1", "Bolt", 10, 0.5);
        RecordUpdate::new().apply_to(&mut record);

        assert_eq!(record, Record::new("A1", "Bolt", 10, 0.5));
    }

    #[test]
    fn test_field_update_from_option() {
        assert_eq!(FieldUpdate::from(Some(5)), FieldUpdate::Set(5));
        assert_eq!(FieldUpdate::<i64>::from(None), FieldUpdate::Keep);
        assert_eq!(FieldUpdate::Set(2.5).as_set(), Some(&2.5));
    }
}
