pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliCommand, CliConfig};

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::aggregator::{summarize, summarize_items};
pub use core::engine::{execute, MenuCommand, MenuEngine, MenuOutput};
pub use core::formatter::{describe, receipt, receipt_for_items};
pub use core::item_check::{check_item, InvalidItem};
pub use core::searcher::{search, search_items};
pub use domain::model::{Diet, MenuItem, MenuStats, OutputFormat};
pub use utils::error::{Result, ThaliError};
