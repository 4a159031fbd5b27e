//! Validation policy for quantities and prices.

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::record::Record;

/// Decides which record values a store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValuePolicy {
    /// Reject negative quantities, negative or non-finite prices and empty keys.
    #[default]
    Strict,
    /// Accept negative quantities and prices and empty keys. Prices must
    /// still be finite.
    Permissive,
}

impl ValuePolicy {
    pub fn is_strict(self) -> bool {
        self == ValuePolicy::Strict
    }

    pub fn check_quantity(self, quantity: i64) -> Result<(), ValueError> {
        if self.is_strict() && quantity < 0 {
            return Err(ValueError::NegativeQuantity(quantity));
        }
        Ok(())
    }

    pub fn check_unit_price(self, unit_price: f64) -> Result<(), ValueError> {
        if !unit_price.is_finite() || (self.is_strict() && unit_price < 0.0) {
            return Err(ValueError::InvalidPrice(unit_price));
        }
        Ok(())
    }

    pub fn check_key(self, key: &str) -> Result<(), ValueError> {
        if self.is_strict() && key.trim().is_empty() {
            return Err(ValueError::EmptyKey);
        }
        Ok(())
    }

    /// Checks every field of a record.
    pub fn check_record(self, record: &Record) -> Result<(), ValueError> {
        self.check_key(record.key())?;
        self.check_quantity(record.quantity())?;
        self.check_unit_price(record.unit_price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        assert_eq!(ValuePolicy::default(), ValuePolicy::Strict);
    }

    #[test]
    fn test_strict_rejects_negative_values() {
        let policy = ValuePolicy::Strict;

        assert_eq!(policy.check_quantity(-1), Err(ValueError::NegativeQuantity(-1)));
        assert!(policy.check_unit_price(-0.01).is_err());
        assert!(policy.check_unit_price(f64::NAN).is_err());
        assert!(policy.check_unit_price(f64::INFINITY).is_err());
        assert_eq!(policy.check_key("  "), Err(ValueError::EmptyKey));
    }

    #[test]
    fn test_strict_accepts_zero() {
        let policy = ValuePolicy::Strict;

        assert!(policy.check_quantity(0).is_ok());
        assert!(policy.check_unit_price(0.0).is_ok());
        assert!(policy.check_record(&Record::new("A1", "Bolt", 0, 0.0)).is_ok());
    }

    #[test]
    fn test_permissive_accepts_negatives() {
        let policy = ValuePolicy::Permissive;

        assert!(policy.check_quantity(-10).is_ok());
        assert!(policy.check_unit_price(-2.5).is_ok());
        assert!(policy.check_key("").is_ok());
        assert!(policy.check_record(&Record::new("", "Ghost", -1, -1.0)).is_ok());
    }

    #[test]
    fn test_permissive_rejects_non_finite_price() {
        let policy = ValuePolicy::Permissive;

        assert!(matches!(
            policy.check_unit_price(f64::INFINITY),
            Err(ValueError::InvalidPrice(_))
        ));
        assert!(policy.check_unit_price(f64::NEG_INFINITY).is_err());
        assert!(policy.check_unit_price(f64::NAN).is_err());
        assert!(policy
            .check_record(&Record::new("I1", "Infinite", 1, f64::INFINITY))
            .is_err());
    }

    #[test]
    fn test_check_record_reports_first_problem() {
        let record = Record::new("A1", "Bolt", -3, -1.0);

        assert_eq!(
            ValuePolicy::Strict.check_record(&record),
            Err(ValueError::NegativeQuantity(-3))
        );
    }
}
