//! Typed inventory commands, their dispatch against the store, and output
//! rendering.
//!
//! Both the one-shot subcommands and the interactive menu turn user input
//! into an [`InventoryCommand`]; [`dispatch`] runs it and returns an
//! [`Outcome`] that [`render`] turns into text. Nothing here reads input.

use stockroom_models::{Record, RecordUpdate};
use stockroom_persistence::{Store, StoreError};
use tracing::debug;

use crate::cli::{Commands, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// A single operation on the inventory.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryCommand {
    /// Add a new record
    Add(Record),
    /// Remove a record by key
    Remove(String),
    /// Change quantity and/or price
    Update { key: String, update: RecordUpdate },
    /// Case-insensitive name search
    Search(String),
    /// List every record
    List,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added(Record),
    Removed(Record),
    /// Record as stored after the update.
    Updated(Record),
    /// Update with nothing to change.
    Unchanged(String),
    Found { query: String, records: Vec<Record> },
    Listed(Vec<Record>),
}

/// Runs a command against the store.
pub fn dispatch(store: &mut Store, command: InventoryCommand) -> std::result::Result<Outcome, StoreError> {
    debug!(?command, "Dispatching command");

    match command {
        InventoryCommand::Add(record) => {
            store.add(record.clone())?;
            Ok(Outcome::Added(record))
        }
        InventoryCommand::Remove(key) => store.remove(&key).map(Outcome::Removed),
        InventoryCommand::Update { key, update } => {
            let empty = update.is_empty();
            store.update(&key, update)?;
            if empty {
                return Ok(Outcome::Unchanged(key));
            }
            store
                .get(&key)
                .cloned()
                .map(Outcome::Updated)
                .ok_or(StoreError::NotFound(key))
        }
        InventoryCommand::Search(query) => {
            let records = store.find_by_name(&query).into_iter().cloned().collect();
            Ok(Outcome::Found { query, records })
        }
        InventoryCommand::List => Ok(Outcome::Listed(
            store.list_all().into_iter().cloned().collect(),
        )),
    }
}

/// Renders an outcome for the terminal.
pub fn render(outcome: &Outcome, format: OutputFormat) -> Result<String> {
    let text = match outcome {
        Outcome::Added(record) => format!("Added: {}", record),
        Outcome::Removed(record) => format!("Removed: {}", record),
        Outcome::Updated(record) => format!("Updated: {}", record),
        Outcome::Unchanged(key) => format!("No changes for '{}'.", key),
        Outcome::Found { query, records } => {
            if records.is_empty() && format != OutputFormat::Json {
                format!("No records match '{}'.", query)
            } else {
                render_records(records, format)?
            }
        }
        Outcome::Listed(records) => {
            if records.is_empty() && format != OutputFormat::Json {
                "Inventory is empty.".to_string()
            } else {
                render_records(records, format)?
            }
        }
    };
    Ok(text)
}

fn render_records(records: &[Record], format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Table => {
            let mut lines = vec![
                format!(
                    "{:<12}  {:<24}  {:>8}  {:>10}",
                    "KEY", "NAME", "QUANTITY", "PRICE"
                ),
                "-".repeat(60),
            ];
            for record in records {
                lines.push(format!(
                    "{:<12}  {:<24}  {:>8}  {:>10}",
                    truncate(record.key(), 12),
                    truncate(record.name(), 24),
                    record.quantity(),
                    format!("${:.2}", record.unit_price())
                ));
            }
            lines.push(format!("\n{} record(s)", records.len()));
            lines.join("\n")
        }
        OutputFormat::Json => serde_json::to_string_pretty(records)?,
        OutputFormat::Brief => records
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(text)
}

/// Execute a one-shot CLI command against an opened store.
pub fn execute(command: &Commands, store: &mut Store) -> Result<()> {
    let Some(inventory_command) = command.to_inventory_command() else {
        return Ok(());
    };

    let outcome = dispatch(store, inventory_command)?;
    println!("{}", render(&outcome, command.output_format())?);
    Ok(())
}

/// Truncates a string to the given number of characters, adding "..." if
/// truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_persistence::{Format, StoreOptions};
    use tempfile::{tempdir, TempDir};

    fn open(dir: &TempDir) -> Store {
        let path = dir.path().join("inventory.json");
        Store::open(path, Format::Json, StoreOptions::default()).unwrap().0
    }

    #[test]
    fn test_dispatch_add_and_list() {
        let dir = tempdir().unwrap();
        let mut store = open(&dir);
        let bolt = Record::new("A1", "Bolt", 10, 0.5);

        let added = dispatch(&mut store, InventoryCommand::Add(bolt.clone())).unwrap();
        let listed = dispatch(&mut store, InventoryCommand::List).unwrap();

        assert_eq!(added, Outcome::Added(bolt.clone()));
        assert_eq!(listed, Outcome::Listed(vec![bolt]));
    }

    #[test]
    fn test_dispatch_update_returns_new_values() {
        let dir = tempdir().unwrap();
        let mut store = open(&dir);
        store.add(Record::new("A1", "Bolt", 10, 0.5)).unwrap();

        let outcome = dispatch(
            &mut store,
            InventoryCommand::Update {
                key: "A1".to_string(),
                update: RecordUpdate::new().quantity(7),
            },
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Updated(Record::new("A1", "Bolt", 7, 0.5)));
    }

    #[test]
    fn test_dispatch_empty_update_is_unchanged() {
        let dir = tempdir().unwrap();
        let mut store = open(&dir);
        store.add(Record::new("A1", "Bolt", 10, 0.5)).unwrap();

        let outcome = dispatch(
            &mut store,
            InventoryCommand::Update {
                key: "A1".to_string(),
                update: RecordUpdate::new(),
            },
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Unchanged("A1".to_string()));
    }

    #[test]
    fn test_dispatch_propagates_store_errors() {
        let dir = tempdir().unwrap();
        let mut store = open(&dir);

        let result = dispatch(&mut store, InventoryCommand::Remove("nope".to_string()));

        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_dispatch_search() {
        let dir = tempdir().unwrap();
        let mut store = open(&dir);
        store.add(Record::new("W1", "Widget", 1, 1.0)).unwrap();
        store.add(Record::new("G1", "Gadget", 1, 1.0)).unwrap();

        let outcome = dispatch(&mut store, InventoryCommand::Search("WID".to_string())).unwrap();

        match outcome {
            Outcome::Found { query, records } => {
                assert_eq!(query, "WID");
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].key(), "W1");
            }
            other => panic!("Expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_render_messages() {
        let bolt = Record::new("A1", "Bolt", 10, 0.5);

        assert_eq!(
            render(&Outcome::Added(bolt.clone()), OutputFormat::Table).unwrap(),
            "Added: A1 | Bolt | quantity: 10 | price: $0.50"
        );
        assert_eq!(
            render(&Outcome::Unchanged("A1".to_string()), OutputFormat::Table).unwrap(),
            "No changes for 'A1'."
        );
        assert_eq!(
            render(&Outcome::Listed(vec![]), OutputFormat::Table).unwrap(),
            "Inventory is empty."
        );
        assert_eq!(
            render(
                &Outcome::Found {
                    query: "zz".to_string(),
                    records: vec![]
                },
                OutputFormat::Brief
            )
            .unwrap(),
            "No records match 'zz'."
        );
    }

    #[test]
    fn test_render_table() {
        let records = vec![Record::new("A1", "Bolt", 10, 0.5)];

        let table = render(&Outcome::Listed(records), OutputFormat::Table).unwrap();

        assert!(table.starts_with("KEY"));
        assert!(table.contains("Bolt"));
        assert!(table.contains("$0.50"));
        assert!(table.ends_with("1 record(s)"));
    }

    #[test]
    fn test_render_json_empty_is_array() {
        let json = render(&Outcome::Listed(vec![]), OutputFormat::Json).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_render_brief() {
        let records = vec![
            Record::new("A1", "Bolt", 10, 0.5),
            Record::new("B2", "Nut", 3, 0.1),
        ];

        let brief = render(&Outcome::Listed(records), OutputFormat::Brief).unwrap();

        assert_eq!(
            brief,
            "A1 | Bolt | quantity: 10 | price: $0.50\nB2 | Nut | quantity: 3 | price: $0.10"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("ñandú grande", 8), "ñandú...");
    }
}
