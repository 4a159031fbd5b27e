//! Interactive numbered menu.
//!
//! The menu only collects text. Each form is parsed into an
//! [`InventoryCommand`] before the store is touched; a parse failure is
//! reported and the operation is dropped.

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Editor, Result as RlResult};
use stockroom_models::{Record, RecordUpdate};
use stockroom_persistence::Store;
use thiserror::Error;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::commands::{self, dispatch, render, InventoryCommand};

/// Errors at the input boundary. These never reach the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Text that should have been a number.
    #[error("{field} must be a number (got {value:?})")]
    InvalidNumber { field: &'static str, value: String },

    /// A required field was left blank.
    #[error("{0} must not be empty")]
    Missing(&'static str),
}

/// Entries of the main menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuChoice {
    Add,
    Remove,
    Update,
    Search,
    List,
    Exit,
    /// Blank input
    Nothing,
    Unknown(String),
}

impl MenuChoice {
    /// Parses a menu selection: a number 1-6 or the option's name.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return MenuChoice::Nothing;
        }

        match input.to_lowercase().as_str() {
            "1" | "add" | "a" => MenuChoice::Add,
            "2" | "remove" | "rm" | "r" => MenuChoice::Remove,
            "3" | "update" | "u" => MenuChoice::Update,
            "4" | "search" | "find" | "s" => MenuChoice::Search,
            "5" | "list" | "ls" | "l" => MenuChoice::List,
            "6" | "exit" | "quit" | "q" => MenuChoice::Exit,
            _ => MenuChoice::Unknown(input.to_string()),
        }
    }
}

/// Raw answers of the add form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub key: String,
    pub name: String,
    pub quantity: String,
    pub price: String,
}

impl AddForm {
    /// Parses the answers into an add command.
    pub fn into_command(self) -> Result<InventoryCommand, InputError> {
        let key = self.key.trim();
        if key.is_empty() {
            return Err(InputError::Missing("key"));
        }
        let quantity = parse_quantity(&self.quantity)?;
        let price = parse_price(&self.price)?;

        Ok(InventoryCommand::Add(Record::new(
            key,
            self.name.trim(),
            quantity,
            price,
        )))
    }
}

/// Raw answers of the update form. Blank numbers mean "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateForm {
    pub key: String,
    pub quantity: String,
    pub price: String,
}

impl UpdateForm {
    /// Parses the answers into an update command.
    ///
    /// Returns `Ok(None)` when both numbers are blank; the store is not
    /// called for an update with nothing to change.
    pub fn into_command(self) -> Result<Option<InventoryCommand>, InputError> {
        let key = self.key.trim();
        if key.is_empty() {
            return Err(InputError::Missing("key"));
        }

        let update = RecordUpdate {
            quantity: parse_optional(&self.quantity, parse_quantity)?.into(),
            unit_price: parse_optional(&self.price, parse_price)?.into(),
        };
        if update.is_empty() {
            return Ok(None);
        }

        Ok(Some(InventoryCommand::Update {
            key: key.to_string(),
            update,
        }))
    }
}

/// Parses a quantity.
pub fn parse_quantity(raw: &str) -> Result<i64, InputError> {
    raw.trim().parse().map_err(|_| InputError::InvalidNumber {
        field: "quantity",
        value: raw.to_string(),
    })
}

/// Parses a unit price.
pub fn parse_price(raw: &str) -> Result<f64, InputError> {
    let value: f64 = raw.trim().parse().map_err(|_| InputError::InvalidNumber {
        field: "price",
        value: raw.to_string(),
    })?;
    // "nan" and "inf" parse as f64
    if !value.is_finite() {
        return Err(InputError::InvalidNumber {
            field: "price",
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn parse_optional<T>(
    raw: &str,
    parse: fn(&str) -> Result<T, InputError>,
) -> Result<Option<T>, InputError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse(raw).map(Some)
    }
}

/// Interactive menu state
pub struct Menu {
    editor: Editor<(), DefaultHistory>,
    store: Store,
    history_path: Option<PathBuf>,
}

impl Menu {
    /// Creates a new menu over an opened store.
    pub fn new(store: Store, history_path: Option<PathBuf>) -> RlResult<Self> {
        let config = rustyline::Config::builder()
            .auto_add_history(false)
            .build();
        let mut editor = Editor::with_config(config)?;

        if let Some(path) = history_path.as_ref().filter(|p| p.exists()) {
            let _ = editor.load_history(path);
        }

        Ok(Self {
            editor,
            store,
            history_path,
        })
    }

    /// Runs the menu loop until the user exits.
    pub fn run(&mut self) -> RlResult<()> {
        println!("Stockroom v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "Inventory: {} ({} record(s), {} format)",
            self.store.path().display(),
            self.store.len(),
            self.store.format()
        );

        loop {
            print_menu();

            let line = match self.editor.readline("Select an option: ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            };

            let choice = MenuChoice::parse(&line);
            debug!(?choice, "Menu selection");
            if !matches!(choice, MenuChoice::Nothing) {
                self.editor.add_history_entry(line.trim())?;
            }

            match choice {
                MenuChoice::Exit => break,
                MenuChoice::Nothing => {}
                MenuChoice::Unknown(input) => {
                    println!("\nInvalid option '{}'. Choose 1-6.", input);
                }
                choice => {
                    if let Some(command) = self.collect(choice)? {
                        self.execute(command);
                    }
                }
            }
        }

        if let Some(path) = &self.history_path {
            let _ = self.editor.save_history(path);
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Asks for the fields of an operation and builds its command.
    ///
    /// Returns `None` if the user cancelled or the input was invalid.
    fn collect(&mut self, choice: MenuChoice) -> RlResult<Option<InventoryCommand>> {
        let parsed = match choice {
            MenuChoice::Add => {
                print_section("ADD RECORD");
                let Some(key) = self.ask("Key: ")? else { return Ok(None) };
                let Some(name) = self.ask("Name: ")? else { return Ok(None) };
                let Some(quantity) = self.ask("Quantity: ")? else { return Ok(None) };
                let Some(price) = self.ask("Unit price: ")? else { return Ok(None) };
                AddForm {
                    key,
                    name,
                    quantity,
                    price,
                }
                .into_command()
                .map(Some)
            }
            MenuChoice::Remove => {
                print_section("REMOVE RECORD");
                let Some(key) = self.ask("Key of the record to remove: ")? else {
                    return Ok(None);
                };
                match key.trim() {
                    "" => Err(InputError::Missing("key")),
                    key => Ok(Some(InventoryCommand::Remove(key.to_string()))),
                }
            }
            MenuChoice::Update => {
                print_section("UPDATE RECORD");
                let Some(key) = self.ask("Key: ")? else { return Ok(None) };
                let Some(quantity) = self.ask("New quantity (blank to keep): ")? else {
                    return Ok(None);
                };
                let Some(price) = self.ask("New unit price (blank to keep): ")? else {
                    return Ok(None);
                };
                let parsed = UpdateForm {
                    key,
                    quantity,
                    price,
                }
                .into_command();
                if let Ok(None) = parsed {
                    println!("\nNo changes made. Enter at least one value to update.");
                }
                parsed
            }
            MenuChoice::Search => {
                print_section("SEARCH");
                let Some(query) = self.ask("Name contains: ")? else { return Ok(None) };
                Ok(Some(InventoryCommand::Search(query.trim().to_string())))
            }
            MenuChoice::List => Ok(Some(InventoryCommand::List)),
            MenuChoice::Exit | MenuChoice::Nothing | MenuChoice::Unknown(_) => Ok(None),
        };

        match parsed {
            Ok(command) => Ok(command),
            Err(e) => {
                println!("\nError: {}", e);
                Ok(None)
            }
        }
    }

    /// Reads one field. `None` means the form was cancelled (Ctrl-C/Ctrl-D).
    fn ask(&mut self, prompt: &str) -> RlResult<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\nCancelled.");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Runs a command and prints the result or the error.
    fn execute(&mut self, command: InventoryCommand) {
        let output: commands::Result<String> = dispatch(&mut self.store, command)
            .map_err(Into::into)
            .and_then(|outcome| render(&outcome, OutputFormat::Brief));

        match output {
            Ok(text) => println!("\n{}", text),
            Err(e) => println!("\nError: {}", e),
        }
    }
}

fn print_menu() {
    println!();
    println!("{}", "=".repeat(40));
    println!("INVENTORY MANAGEMENT");
    println!("{}", "=".repeat(40));
    println!("1. Add a record");
    println!("2. Remove a record by key");
    println!("3. Update quantity or price");
    println!("4. Search by name");
    println!("5. List all records");
    println!("6. Exit");
    println!("{}", "=".repeat(40));
}

fn print_section(title: &str) {
    println!();
    println!("{}", "-".repeat(30));
    println!("{}", title);
    println!("{}", "-".repeat(30));
}
