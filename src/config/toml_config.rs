use crate::core::loader::MenuDocument;
use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::{Result, ThaliError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MENU_PATH: &str = "menu.json";

/// Optional settings file (`thali.toml`). Every section may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub menu: Option<MenuConfig>,
    pub output: Option<OutputConfig>,
    pub receipt: Option<ReceiptConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptConfig {
    pub default_customer: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ThaliError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ThaliError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${THALI_MENU})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ThaliError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn default_customer(&self) -> Option<&str> {
        self.receipt
            .as_ref()
            .and_then(|r| r.default_customer.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn menu_path(&self) -> &str {
        self.menu
            .as_ref()
            .map(|m| m.path.as_str())
            .unwrap_or(DEFAULT_MENU_PATH)
    }

    fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_menu_path("menu.path", self.menu_path())?;

        if let Some(output_path) = self.output_path() {
            validation::validate_path("output.path", output_path)?;
        }

        if let Some(customer) = self.default_customer() {
            validation::validate_non_empty_string("receipt.default_customer", customer)?;
        }

        Ok(())
    }
}

pub(crate) fn validate_menu_path(field_name: &str, path: &str) -> Result<()> {
    validation::validate_path(field_name, path)?;
    validation::validate_file_extension(field_name, path, &MenuDocument::EXTENSIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let content = r#"
[menu]
path = "menus/lunch.toml"

[output]
format = "json"
path = "out/stats.json"

[receipt]
default_customer = "Asha"
"#;
        let config = TomlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.menu_path(), "menus/lunch.toml");
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.output_path(), Some("out/stats.json"));
        assert_eq!(config.default_customer(), Some("Asha"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.menu_path(), DEFAULT_MENU_PATH);
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(config.output_path().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("THALI_TEST_MENU_PATH", "menus/dinner.csv");

        let config = TomlConfig::from_toml_str(
            r#"
[menu]
path = "${THALI_TEST_MENU_PATH}"
"#,
        )
        .unwrap();
        assert_eq!(config.menu_path(), "menus/dinner.csv");

        std::env::remove_var("THALI_TEST_MENU_PATH");
    }

    #[test]
    fn test_unknown_placeholder_is_left_alone() {
        let config = TomlConfig::from_toml_str(
            r#"
[receipt]
default_customer = "${THALI_TEST_SURELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(config.default_customer(), Some("${THALI_TEST_SURELY_UNSET}"));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[menu]
path = "menu.xlsx"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[receipt]
default_customer = "  "
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_format_is_a_config_error() {
        let result = TomlConfig::from_toml_str(
            r#"
[output]
format = "yaml"
"#,
        );
        assert!(matches!(result, Err(ThaliError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[menu]\npath = \"thalis.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.menu_path(), "thalis.json");
    }
}
