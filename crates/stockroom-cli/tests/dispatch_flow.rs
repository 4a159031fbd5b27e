//! Subcommands and menu forms driving a store on disk.

use clap::Parser;
use stockroom_cli::cli::Cli;
use stockroom_cli::commands::{dispatch, render, InventoryCommand, Outcome};
use stockroom_cli::menu::{AddForm, UpdateForm};
use stockroom_models::Record;
use stockroom_persistence::{Format, Store, StoreError};
use tempfile::tempdir;

fn run(store: &mut Store, args: &[&str]) -> Result<Outcome, StoreError> {
    let cli = Cli::parse_from(args.iter().copied());
    let command = cli
        .command
        .and_then(|c| c.to_inventory_command())
        .expect("subcommand");
    dispatch(store, command)
}

#[test]
fn subcommands_persist_between_runs() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("stock.txt");
    let file_arg = file.to_string_lossy().to_string();

    let open = || {
        let cli = Cli::parse_from(["stockroom", "--file", file_arg.as_str()]);
        let config = cli.store_config();
        assert_eq!(config.format, Format::Lines);
        Store::open(config.path, config.format, config.options).unwrap().0
    };

    let mut store = open();
    run(&mut store, &["stockroom", "add", "A1", "Bolt", "10", "0.5"]).unwrap();
    run(&mut store, &["stockroom", "add", "B2", "Nut", "250", "0.05"]).unwrap();
    run(&mut store, &["stockroom", "update", "A1", "-p", "0.45"]).unwrap();

    let mut store = open();
    let outcome = run(&mut store, &["stockroom", "list"]).unwrap();
    assert_eq!(
        outcome,
        Outcome::Listed(vec![
            Record::new("A1", "Bolt", 10, 0.45),
            Record::new("B2", "Nut", 250, 0.05),
        ])
    );

    run(&mut store, &["stockroom", "remove", "A1"]).unwrap();
    let store = open();
    assert_eq!(store.len(), 1);
}

#[test]
fn strict_store_rejects_negative_quantity_from_cli() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("stock.json");
    let file_arg = file.to_string_lossy().to_string();

    let cli = Cli::parse_from(["stockroom", "--file", file_arg.as_str()]);
    let config = cli.store_config();
    let (mut store, _) = Store::open(config.path, config.format, config.options).unwrap();

    let result = run(&mut store, &["stockroom", "add", "R1", "Returned", "-2", "1.0"]);

    assert!(matches!(result, Err(StoreError::InvalidValue(_))));
    assert!(!file.exists());
}

#[test]
fn duplicate_key_message_reaches_user() {
    let dir = tempdir().unwrap();
    let mut store = Store::new(dir.path().join("stock.json"), Format::Json, Default::default());
    run(&mut store, &["stockroom", "add", "A1", "Bolt", "10", "0.5"]).unwrap();

    let err = run(&mut store, &["stockroom", "add", "A1", "Other", "1", "1"]).unwrap_err();

    assert!(err.to_string().contains("A1"));
    assert_eq!(store.get("A1").unwrap().name(), "Bolt");
}

#[test]
fn menu_forms_feed_the_same_dispatcher() {
    let dir = tempdir().unwrap();
    let mut store = Store::new(dir.path().join("stock.json"), Format::Json, Default::default());

    let add = AddForm {
        key: "W1".to_string(),
        name: "Widget".to_string(),
        quantity: "4".to_string(),
        price: "2.50".to_string(),
    }
    .into_command()
    .unwrap();
    dispatch(&mut store, add).unwrap();

    let unchanged = UpdateForm {
        key: "W1".to_string(),
        quantity: String::new(),
        price: String::new(),
    }
    .into_command()
    .unwrap();
    assert!(unchanged.is_none());

    let update = UpdateForm {
        key: "W1".to_string(),
        quantity: "9".to_string(),
        price: String::new(),
    }
    .into_command()
    .unwrap()
    .unwrap();
    let outcome = dispatch(&mut store, update).unwrap();

    assert_eq!(
        render(&outcome, Default::default()).unwrap(),
        "Updated: W1 | Widget | quantity: 9 | price: $2.50"
    );

    let found = dispatch(&mut store, InventoryCommand::Search("dg".to_string())).unwrap();
    assert!(matches!(found, Outcome::Found { records, .. } if records.len() == 1));
}

#[test]
fn permissive_cli_still_rejects_infinite_price() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("stock.json");
    let file_arg = file.to_string_lossy().to_string();

    let cli = Cli::parse_from(["stockroom", "--permissive", "--file", file_arg.as_str()]);
    let config = cli.store_config();
    let (mut store, _) = Store::open(config.path, config.format, config.options).unwrap();

    let result = run(&mut store, &["stockroom", "add", "I1", "X", "1", "inf"]);

    assert!(matches!(result, Err(StoreError::InvalidValue(_))));
    assert!(store.is_empty());
    assert!(!file.exists());
}
