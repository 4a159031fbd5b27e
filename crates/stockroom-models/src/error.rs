//! Error types for record validation and field parsing.

use thiserror::Error;

/// A value rejected by [`ValuePolicy::Strict`](crate::ValuePolicy::Strict).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// Quantity below zero.
    #[error("quantity must not be negative (got {0})")]
    NegativeQuantity(i64),

    /// Price below zero, NaN or infinite.
    #[error("price must be a non-negative number (got {0})")]
    InvalidPrice(f64),

    /// Key empty or whitespace only.
    #[error("key must not be empty")]
    EmptyKey,
}

/// Errors raised when rebuilding a record from its delimited fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Wrong number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// Quantity is not an integer.
    #[error("invalid quantity: {0:?}")]
    Quantity(String),

    /// Price is not a number.
    #[error("invalid price: {0:?}")]
    Price(String),
}
