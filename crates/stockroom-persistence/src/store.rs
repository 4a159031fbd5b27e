//! File-backed inventory store.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use stockroom_models::{Record, RecordUpdate, ValuePolicy};
use tracing::{debug, info, warn};

use crate::atomic::{atomic_write, read_optional};
use crate::codec::{EntryLocation, Format, ListOrder};
use crate::error::{PersistenceError, StoreError};

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Construction-time settings of a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreOptions {
    /// Which quantities, prices and keys are accepted.
    pub policy: ValuePolicy,
    /// Reject a new record whose name matches an existing one, ignoring case.
    pub unique_names: bool,
}

impl StoreOptions {
    /// Sets the value policy.
    pub fn policy(mut self, policy: ValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables the unique-name check.
    pub fn unique_names(mut self, unique_names: bool) -> Self {
        self.unique_names = unique_names;
        self
    }
}

/// An entry left out while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub location: EntryLocation,
    pub reason: String,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.reason)
    }
}

/// Outcome of [`Store::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Whether the backing file existed.
    pub file_found: bool,
    /// Number of records loaded.
    pub loaded: usize,
    /// Entries that were skipped, in file order.
    pub skipped: Vec<SkippedEntry>,
}

impl LoadReport {
    /// Returns true if no entry was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// In-memory inventory mirrored to a single backing file.
///
/// Records keep their insertion order, which is also the file order. Each
/// mutation follows the same steps: validate, change memory, rewrite the
/// whole file, and on a failed write restore memory to its previous state.
///
/// The store is single-threaded. Callers sharing it across threads must
/// wrap it in one `Mutex`.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    format: Format,
    options: StoreOptions,
    records: Vec<Record>,
    /// Lowercased name -> key. Only maintained with `unique_names`.
    names: HashMap<String, String>,
}

impl Store {
    /// Creates an empty store without touching the file.
    pub fn new(path: impl Into<PathBuf>, format: Format, options: StoreOptions) -> Self {
        Self {
            path: path.into(),
            format,
            options,
            records: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Creates a store and loads its backing file.
    ///
    /// A missing file gives an empty store.
    pub fn open(
        path: impl Into<PathBuf>,
        format: Format,
        options: StoreOptions,
    ) -> Result<(Self, LoadReport)> {
        let mut store = Self::new(path, format, options);
        let report = store.load()?;
        Ok((store, report))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the in-memory records with the contents of the backing file.
    ///
    /// Malformed entries, entries rejected by the value policy, repeated
    /// keys and (with `unique_names`) repeated names are skipped with a
    /// warning. A file that exists but cannot be read or parsed as a whole
    /// is an error, and leaves the store empty.
    pub fn load(&mut self) -> Result<LoadReport> {
        self.records.clear();
        self.names.clear();

        let Some(contents) = read_optional(&self.path).map_err(StoreError::Load)? else {
            info!(path = %self.path.display(), "Inventory file not found, starting empty");
            return Ok(LoadReport::default());
        };

        let decoded = self
            .format
            .codec()
            .decode(&contents)
            .map_err(StoreError::Load)?;

        let mut skipped: Vec<SkippedEntry> = decoded
            .skipped
            .into_iter()
            .map(|(location, reason)| SkippedEntry { location, reason })
            .collect();

        for (location, record) in decoded.entries {
            match self.check_insert(&record) {
                Ok(()) => self.insert(record),
                Err(e) => skipped.push(SkippedEntry {
                    location,
                    reason: e.to_string(),
                }),
            }
        }
        skipped.sort_by_key(|entry| entry.location);

        for entry in &skipped {
            warn!(
                path = %self.path.display(),
                location = %entry.location,
                reason = %entry.reason,
                "Skipping inventory entry"
            );
        }

        info!(
            path = %self.path.display(),
            file_format = %self.format,
            loaded = self.records.len(),
            skipped = skipped.len(),
            "Inventory loaded"
        );

        Ok(LoadReport {
            file_found: true,
            loaded: self.records.len(),
            skipped,
        })
    }

    /// Adds a new record.
    ///
    /// # Errors
    /// `InvalidValue`, `DuplicateKey`, `DuplicateName` (unique-name stores),
    /// or `Persist` after rolling the insertion back.
    pub fn add(&mut self, record: Record) -> Result<()> {
        self.check_insert(&record)?;

        let key = record.key().to_string();
        self.insert(record);

        if let Err(e) = self.persist() {
            warn!(key = %key, error = %e, "Save failed, rolling back add");
            if let Some(record) = self.records.pop() {
                self.unindex_name(&record);
            }
            return Err(StoreError::Persist(e));
        }

        info!(key = %key, "Record added");
        Ok(())
    }

    /// Removes a record and returns it.
    ///
    /// # Errors
    /// `NotFound`, or `Persist` after putting the record back in its place.
    pub fn remove(&mut self, key: &str) -> Result<Record> {
        let index = self.position(key)?;
        let removed = self.records.remove(index);
        self.unindex_name(&removed);

        if let Err(e) = self.persist() {
            warn!(key = %key, error = %e, "Save failed, rolling back remove");
            self.index_name(&removed);
            self.records.insert(index, removed);
            return Err(StoreError::Persist(e));
        }

        info!(key = %key, "Record removed");
        Ok(removed)
    }

    /// Changes quantity and/or price of a record.
    ///
    /// An update that changes nothing succeeds without writing the file.
    ///
    /// # Errors
    /// `NotFound`, `InvalidValue`, or `Persist` after restoring the previous
    /// values.
    pub fn update(&mut self, key: &str, update: RecordUpdate) -> Result<()> {
        let index = self.position(key)?;

        if update.is_empty() {
            debug!(key = %key, "Empty update, nothing to save");
            return Ok(());
        }

        if let Some(&quantity) = update.quantity.as_set() {
            self.options.policy.check_quantity(quantity)?;
        }
        if let Some(&unit_price) = update.unit_price.as_set() {
            self.options.policy.check_unit_price(unit_price)?;
        }

        let snapshot = self.records[index].clone();
        update.apply_to(&mut self.records[index]);

        if let Err(e) = self.persist() {
            warn!(key = %key, error = %e, "Save failed, rolling back update");
            self.records[index] = snapshot;
            return Err(StoreError::Persist(e));
        }

        info!(key = %key, "Record updated");
        Ok(())
    }

    /// Returns the record with this key.
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.key() == key)
    }

    /// Returns records whose name contains `query`, ignoring case, in
    /// insertion order. The empty query matches every record.
    pub fn find_by_name(&self, query: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.matches_name(query))
            .collect()
    }

    /// Returns all records in the format's [`ListOrder`].
    pub fn list_all(&self) -> Vec<&Record> {
        let mut records: Vec<&Record> = self.records.iter().collect();
        if self.format.list_order() == ListOrder::ByKey {
            records.sort_by(|a, b| a.key().cmp(b.key()));
        }
        records
    }

    /// Returns all records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn position(&self, key: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.key() == key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Checks that `record` may join the store: value policy, key and name.
    fn check_insert(&self, record: &Record) -> Result<()> {
        self.options.policy.check_record(record)?;

        if self.get(record.key()).is_some() {
            return Err(StoreError::DuplicateKey(record.key().to_string()));
        }

        if self.options.unique_names {
            if let Some(existing_key) = self.names.get(&record.name().to_lowercase()) {
                return Err(StoreError::DuplicateName {
                    name: record.name().to_string(),
                    existing_key: existing_key.clone(),
                });
            }
        }

        Ok(())
    }

    fn insert(&mut self, record: Record) {
        self.index_name(&record);
        self.records.push(record);
    }

    fn index_name(&mut self, record: &Record) {
        if self.options.unique_names {
            self.names
                .insert(record.name().to_lowercase(), record.key().to_string());
        }
    }

    fn unindex_name(&mut self, record: &Record) {
        if self.options.unique_names {
            self.names.remove(&record.name().to_lowercase());
        }
    }

    /// Rewrites the backing file with every record.
    fn persist(&self) -> std::result::Result<(), PersistenceError> {
        let contents = self.format.codec().encode(&self.records)?;
        atomic_write(&self.path, contents.as_bytes())?;
        debug!(
            path = %self.path.display(),
            records = self.records.len(),
            "Inventory saved"
        );
        Ok(())
    }
}
