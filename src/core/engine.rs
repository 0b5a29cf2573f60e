use crate::core::aggregator::summarize;
use crate::core::formatter::{describe, receipt};
use crate::core::item_check::{as_record, name_of};
use crate::core::loader::{parse_menu, MenuDocument};
use crate::core::searcher::search;
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{MenuStats, OutputFormat};
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// Describe one record by position, or every record when `index` is `None`.
    Describe { index: Option<usize> },
    Stats,
    Search { query: String },
    Receipt { customer: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MenuOutput {
    Descriptions(Vec<String>),
    Stats(Option<MenuStats>),
    Matches(Vec<Value>),
    Receipt(String),
}

impl MenuOutput {
    /// True when the operation fell back to its empty/absent result.
    pub fn is_empty(&self) -> bool {
        match self {
            MenuOutput::Descriptions(lines) => lines.is_empty(),
            MenuOutput::Stats(stats) => stats.is_none(),
            MenuOutput::Matches(matches) => matches.is_empty(),
            MenuOutput::Receipt(text) => text.is_empty(),
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        match self {
            MenuOutput::Descriptions(lines) => lines.join("\n"),
            MenuOutput::Stats(None) => String::new(),
            MenuOutput::Stats(Some(stats)) => format!(
                "Thalis: {}\nVeg: {}\nNon-Veg: {}\nAverage: Rs.{}\nCheapest: Rs.{}\nCostliest: Rs.{}\nNames: {}",
                stats.total_count,
                stats.veg_count,
                stats.non_veg_count,
                stats.average_price,
                stats.cheapest,
                stats.costliest,
                stats.names.join(", ")
            ),
            MenuOutput::Matches(matches) => matches
                .iter()
                .map(|value| {
                    // 搜尋結果不一定有價格，退回只顯示名稱
                    let line = describe(value);
                    if line.is_empty() {
                        as_record(value)
                            .and_then(name_of)
                            .map(str::to_string)
                            .unwrap_or_default()
                    } else {
                        line
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
            MenuOutput::Receipt(text) => text.clone(),
        }
    }
}

/// Runs a single command against an in-memory menu. No I/O.
pub fn execute(menu: &Value, command: &MenuCommand) -> MenuOutput {
    match command {
        MenuCommand::Describe { index: Some(index) } => {
            let line = menu.get(*index).map(describe).unwrap_or_default();
            let lines = if line.is_empty() { vec![] } else { vec![line] };
            MenuOutput::Descriptions(lines)
        }
        MenuCommand::Describe { index: None } => {
            let records = menu.as_array().map(Vec::as_slice).unwrap_or_default();
            let lines: Vec<String> = records
                .iter()
                .map(describe)
                .filter(|line| !line.is_empty())
                .collect();
            if lines.len() < records.len() {
                tracing::warn!(
                    "⚠️ {} of {} records could not be described",
                    records.len() - lines.len(),
                    records.len()
                );
            }
            MenuOutput::Descriptions(lines)
        }
        MenuCommand::Stats => MenuOutput::Stats(summarize(menu)),
        MenuCommand::Search { query } => {
            MenuOutput::Matches(search(menu, query).into_iter().cloned().collect())
        }
        MenuCommand::Receipt { customer } => MenuOutput::Receipt(receipt(customer, menu)),
    }
}

pub struct MenuEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> MenuEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub async fn load_menu(&self) -> Result<Value> {
        let path = self.config.menu_path();
        let document = MenuDocument::from_path(path)?;

        tracing::debug!("Reading menu from: {}", path);
        let data = self.storage.read_file(path).await?;
        parse_menu(&data, document)
    }

    /// Loads the menu, runs `command` and returns the rendered result. When an
    /// output path is configured the result is also written there.
    pub async fn run(&self, command: &MenuCommand) -> Result<String> {
        let menu = self.load_menu().await?;
        tracing::info!(
            "📋 Loaded {} menu records from {}",
            menu.as_array().map(Vec::len).unwrap_or(0),
            self.config.menu_path()
        );

        let output = execute(&menu, command);
        if output.is_empty() {
            tracing::warn!("⚠️ {:?} produced no result; the input was rejected", command);
        }

        let rendered = output.render(self.config.output_format())?;

        if let Some(output_path) = self.config.output_path() {
            self.storage
                .write_file(output_path, rendered.as_bytes())
                .await?;
            tracing::info!("📁 Output saved to: {}", output_path);
        }

        Ok(rendered)
    }
}
