use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShrinkError {
    #[error("Request to {url} failed: {reason}")]
    NetworkError { url: String, reason: String },

    #[error("Cannot parse {field} from {value:?}")]
    ParseError { field: String, value: String },

    #[error("Invalid {kind} unit: {code}")]
    InvalidUnitError { kind: String, code: String },

    #[error("Invalid selector {selector}: {message}")]
    SelectorError { selector: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Extraction,
    Comparison,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ShrinkError {
    pub fn network(url: &str, reason: impl ToString) -> Self {
        Self::NetworkError {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NetworkError { .. } => ErrorCategory::Network,
            Self::ParseError { .. } | Self::SelectorError { .. } => ErrorCategory::Extraction,
            Self::InvalidUnitError { .. } => ErrorCategory::Comparison,
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Storage
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 比較器會吸收這幾類錯誤
            Self::NetworkError { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } | Self::InvalidUnitError { .. } => ErrorSeverity::Low,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorSeverity::High,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::SelectorError { .. } | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the product URL and your network connection",
            ErrorCategory::Extraction => "The page markup may have changed; inspect the product page",
            ErrorCategory::Comparison => "Use one of the supported units: USD, EUR, GBP / oz, g",
            ErrorCategory::Storage => {
                "Check file permissions, or delete a corrupt cache file to start fresh"
            }
            ErrorCategory::Configuration => "Fix the configuration file and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NetworkError { url, .. } => format!("Could not download {}", url),
            Self::ParseError { field, value } => {
                format!("The {} on the page ({:?}) is not a number", field, value)
            }
            Self::InvalidUnitError { kind, code } => {
                format!("'{}' is not a supported {} unit", code, kind)
            }
            Self::SerializationError(_) => "The product cache file is unreadable".to_string(),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShrinkError>;
