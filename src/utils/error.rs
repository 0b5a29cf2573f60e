use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThaliError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Menu format error: {message}")]
    MenuFormatError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Parsing,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ThaliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ThaliError::IoError(_) => ErrorCategory::Io,
            ThaliError::SerializationError(_)
            | ThaliError::TomlError(_)
            | ThaliError::CsvError(_)
            | ThaliError::MenuFormatError { .. } => ErrorCategory::Parsing,
            ThaliError::ConfigError { .. }
            | ThaliError::InvalidConfigValueError { .. }
            | ThaliError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Parsing => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ThaliError::IoError(e) => format!("Could not read or write a file: {}", e),
            ThaliError::SerializationError(_)
            | ThaliError::TomlError(_)
            | ThaliError::CsvError(_) => "The menu file could not be parsed".to_string(),
            ThaliError::MenuFormatError { message } => format!("Unsupported menu file: {}", message),
            ThaliError::ConfigError { message } => format!("Configuration problem: {}", message),
            ThaliError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            ThaliError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the path exists and is readable",
            ErrorCategory::Parsing => {
                "Use a .json, .toml or .csv menu with name, items, price and isVeg fields"
            }
            ErrorCategory::Configuration => "Run with --help to see the accepted options",
        }
    }
}

pub type Result<T> = std::result::Result<T, ThaliError>;
