//! Location and format of the inventory file.
//!
//! # Storage Structure
//!
//! Without an explicit `--file`, data lives under `~/.stockroom/`:
//!
//! ```text
//! ~/.stockroom/
//! ├── inventory.json     # or inventory.txt with --format lines
//! └── menu_history.txt   # interactive menu history
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKROOM_DIR`: Override the data directory
//! - `STOCKROOM_FILE`: Inventory file (same as `--file`)
//! - `STOCKROOM_FORMAT`: File format (same as `--format`)

use std::path::{Path, PathBuf};

use stockroom_persistence::{Format, StoreOptions};

/// Environment variable for a custom data directory.
pub const DATA_DIR_ENV: &str = "STOCKROOM_DIR";

/// Default data directory name under home.
const DEFAULT_DATA_DIR: &str = ".stockroom";

/// Base name of the default inventory file.
const INVENTORY_FILE_STEM: &str = "inventory";

/// File name of the menu history.
const HISTORY_FILE: &str = "menu_history.txt";

/// Get the Stockroom data directory.
///
/// The data directory is determined by:
/// 1. `STOCKROOM_DIR` environment variable if set
/// 2. `~/.stockroom` if home directory is available
/// 3. `.stockroom` in current directory as fallback
pub fn data_dir() -> PathBuf {
    resolve_data_dir(std::env::var(DATA_DIR_ENV).ok(), dirs::home_dir())
}

fn resolve_data_dir(env_dir: Option<String>, home: Option<PathBuf>) -> PathBuf {
    match env_dir {
        Some(dir) if !dir.trim().is_empty() => expand_path(Path::new(&dir)),
        _ => home
            .map(|h| h.join(DEFAULT_DATA_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
    }
}

/// Get the path of the menu history file.
pub fn history_path() -> PathBuf {
    data_dir().join(HISTORY_FILE)
}

/// Expands a leading `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Everything needed to open the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub format: Format,
    pub options: StoreOptions,
}

impl StoreConfig {
    /// Resolves path and format from command-line values.
    ///
    /// An explicit format wins; otherwise it follows the file extension, and
    /// with no file at all JSON is used in the data directory.
    pub fn resolve(
        file: Option<&Path>,
        format: Option<Format>,
        options: StoreOptions,
        data_dir: &Path,
    ) -> Self {
        let (path, format) = match (file, format) {
            (Some(file), Some(format)) => (expand_path(file), format),
            (Some(file), None) => {
                let path = expand_path(file);
                let format = Format::from_path(&path);
                (path, format)
            }
            (None, format) => {
                let format = format.unwrap_or(Format::Json);
                let name = format!("{}.{}", INVENTORY_FILE_STEM, format.extension());
                (data_dir.join(name), format)
            }
        };

        Self {
            path,
            format,
            options,
        }
    }
}
