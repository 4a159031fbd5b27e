//! Persistence layer for Stockroom.
//!
//! This crate provides the [`Store`]: an in-memory inventory mirrored to a
//! single backing file. Every mutation rewrites the whole file with an
//! atomic write (temp file, then rename); if the write fails the in-memory
//! change is rolled back.
//!
//! # Example
//!
//! ```no_run
//! use stockroom_models::{Record, RecordUpdate};
//! use stockroom_persistence::{Format, Store, StoreOptions};
//!
//! let (mut store, _report) =
//!     Store::open("/tmp/inventory.json", Format::Json, StoreOptions::default()).unwrap();
//!
//! store.add(Record::new("A1", "Bolt", 10, 0.5)).unwrap();
//! store.update("A1", RecordUpdate::new().quantity(7)).unwrap();
//!
//! for record in store.find_by_name("bol") {
//!     println!("{record}");
//! }
//! ```

pub mod atomic;
pub mod codec;
pub mod error;
pub mod store;

pub use codec::{Decoded, EntryLocation, Format, JsonCodec, LineCodec, ListOrder, RecordCodec};
pub use error::{PersistenceError, Result, StoreError};
pub use store::{LoadReport, SkippedEntry, Store, StoreOptions};
