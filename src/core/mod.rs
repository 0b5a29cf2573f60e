pub mod aggregator;
pub mod engine;
pub mod formatter;
pub mod item_check;
pub mod loader;
pub mod searcher;

pub use crate::domain::model::{Diet, MenuItem, MenuStats, OutputFormat};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
