//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use stockroom_models::{Record, RecordUpdate, ValuePolicy};
use stockroom_persistence::{Format, StoreOptions};

use crate::commands::InventoryCommand;
use crate::config::{self, StoreConfig};

/// Stockroom - file-backed inventory manager
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Inventory file (default: ~/.stockroom/inventory.json)
    #[arg(short, long, env = "STOCKROOM_FILE")]
    pub file: Option<PathBuf>,

    /// File format (default: from the file extension)
    #[arg(long, value_enum, env = "STOCKROOM_FORMAT")]
    pub format: Option<FileFormat>,

    /// Reject records whose name matches an existing one (ignoring case)
    #[arg(long)]
    pub unique_names: bool,

    /// Accept negative quantities and prices and empty keys
    #[arg(long)]
    pub permissive: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new record
    Add {
        /// Unique key
        key: String,

        /// Display name
        name: String,

        /// Units in stock
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        /// Unit price
        #[arg(allow_negative_numbers = true)]
        price: f64,
    },

    /// Remove a record by key
    Remove {
        /// Key of the record to remove
        key: String,
    },

    /// Change quantity and/or price of a record
    Update {
        /// Key of the record to update
        key: String,

        /// New quantity
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: Option<i64>,

        /// New unit price
        #[arg(short, long, allow_negative_numbers = true)]
        price: Option<f64>,
    },

    /// Search records by name (case-insensitive substring)
    Search {
        /// Text to look for; empty matches everything
        #[arg(default_value = "")]
        query: String,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// List all records
    List {
        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Start the interactive menu
    Menu,
}

/// Backing file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FileFormat {
    /// One `key|name|quantity|price` line per record
    Lines,
    /// JSON array of records
    Json,
}

impl From<FileFormat> for Format {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Lines => Format::Lines,
            FileFormat::Json => Format::Json,
        }
    }
}

/// Output format for record listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

impl Commands {
    /// Converts a subcommand into the command the dispatcher runs.
    ///
    /// Returns `None` for `menu`, which has no single command.
    pub fn to_inventory_command(&self) -> Option<InventoryCommand> {
        let command = match self {
            Commands::Add {
                key,
                name,
                quantity,
                price,
            } => InventoryCommand::Add(Record::new(key.as_str(), name.as_str(), *quantity, *price)),
            Commands::Remove { key } => InventoryCommand::Remove(key.clone()),
            Commands::Update {
                key,
                quantity,
                price,
            } => InventoryCommand::Update {
                key: key.clone(),
                update: RecordUpdate {
                    quantity: (*quantity).into(),
                    unit_price: (*price).into(),
                },
            },
            Commands::Search { query, .. } => InventoryCommand::Search(query.clone()),
            Commands::List { .. } => InventoryCommand::List,
            Commands::Menu => return None,
        };
        Some(command)
    }

    /// Output format requested for listings.
    pub fn output_format(&self) -> OutputFormat {
        match self {
            Commands::Search { output, .. } | Commands::List { output } => *output,
            _ => OutputFormat::default(),
        }
    }
}

impl Cli {
    /// Returns the store options selected by flags.
    pub fn store_options(&self) -> StoreOptions {
        let policy = if self.permissive {
            ValuePolicy::Permissive
        } else {
            ValuePolicy::Strict
        };
        StoreOptions::default()
            .policy(policy)
            .unique_names(self.unique_names)
    }

    /// Resolves the inventory file, format and options.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::resolve(
            self.file.as_deref(),
            self.format.map(Format::from),
            self.store_options(),
            &config::data_dir(),
        )
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
