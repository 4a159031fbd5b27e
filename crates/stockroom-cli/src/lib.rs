//! Stockroom CLI library.
//!
//! This crate provides the command-line interface, the typed command
//! dispatcher shared by subcommands and the menu, and the interactive menu
//! itself.

pub mod cli;
pub mod commands;
pub mod config;
pub mod menu;
