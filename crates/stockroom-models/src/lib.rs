//! Core data models for Stockroom.
//!
//! This crate provides the inventory [`Record`], the partial update types
//! used to change one, and the [`ValuePolicy`] deciding which quantities and
//! prices are acceptable.

pub mod error;
pub mod policy;
pub mod record;
pub mod update;

// Re-export main types
pub use error::{FieldError, ValueError};
pub use policy::ValuePolicy;
pub use record::{Record, FIELD_COUNT};
pub use update::{FieldUpdate, RecordUpdate};
