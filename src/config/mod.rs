pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::{CliCommand, CliConfig};

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::{validate_menu_path, TomlConfig, DEFAULT_MENU_PATH};
    use crate::core::engine::MenuCommand;
    use crate::core::{ConfigProvider, OutputFormat};
    use crate::utils::error::{Result, ThaliError};
    use crate::utils::validation::{self, Validate};
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "thali")]
    #[command(about = "Describe, summarize, search and bill a thali menu")]
    pub struct CliConfig {
        /// Menu file (.json, .toml or .csv)
        #[arg(short, long)]
        pub menu: Option<String>,

        /// Optional TOML settings file
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, value_enum)]
        pub format: Option<OutputFormat>,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        pub output: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,

        #[arg(skip)]
        pub default_customer: Option<String>,

        #[command(subcommand)]
        pub command: CliCommand,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum CliCommand {
        /// Describe one thali, or all of them
        Describe {
            #[arg(long)]
            index: Option<usize>,
        },
        /// Summary statistics for the menu
        Stats,
        /// Thalis whose name or items contain QUERY (case-insensitive)
        Search { query: String },
        /// Receipt for the whole menu
        Receipt { customer: Option<String> },
    }

    impl CliConfig {
        /// Fill in anything not given on the command line from the settings file.
        pub fn apply_file(&mut self, file: &TomlConfig) {
            if self.menu.is_none() {
                self.menu = file.menu.as_ref().map(|m| m.path.clone());
            }
            if self.format.is_none() {
                self.format = file.output.as_ref().and_then(|o| o.format);
            }
            if self.output.is_none() {
                self.output = file.output_path().map(str::to_string);
            }
            if self.default_customer.is_none() {
                self.default_customer = file.default_customer().map(str::to_string);
            }
        }

        pub fn menu_command(&self) -> Result<MenuCommand> {
            let command = match &self.command {
                CliCommand::Describe { index } => MenuCommand::Describe { index: *index },
                CliCommand::Stats => MenuCommand::Stats,
                CliCommand::Search { query } => MenuCommand::Search {
                    query: query.clone(),
                },
                CliCommand::Receipt { customer } => {
                    let customer = customer.clone().or_else(|| self.default_customer.clone());
                    MenuCommand::Receipt {
                        customer: validation::validate_required_field(
                            "receipt.customer",
                            &customer,
                        )?
                        .clone(),
                    }
                }
            };
            Ok(command)
        }
    }

    impl ConfigProvider for CliConfig {
        fn menu_path(&self) -> &str {
            self.menu.as_deref().unwrap_or(DEFAULT_MENU_PATH)
        }

        fn output_format(&self) -> OutputFormat {
            self.format.unwrap_or_default()
        }

        fn output_path(&self) -> Option<&str> {
            self.output.as_deref()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_menu_path("menu", self.menu_path())?;

            if let Some(output) = &self.output {
                validation::validate_path("output", output)?;
            }

            if let Some(config) = &self.config {
                if config.is_empty() {
                    return Err(ThaliError::ConfigError {
                        message: "--config was given an empty path".to_string(),
                    });
                }
            }

            Ok(())
        }
    }

}
