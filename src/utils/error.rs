use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid domain '{value}': {reason}")]
    InvalidDomainError { value: String, reason: String },

    #[error("Input error: {message}")]
    InputError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Input,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoutError::HttpClientError(_) => ErrorCategory::Network,
            ScoutError::CsvError(_)
            | ScoutError::InvalidDomainError { .. }
            | ScoutError::InputError { .. } => ErrorCategory::Input,
            ScoutError::IoError(_) | ScoutError::SerializationError(_) => ErrorCategory::Output,
            ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一網域無效只會被略過
            ScoutError::InvalidDomainError { .. } => ErrorSeverity::Low,
            ScoutError::HttpClientError(_) => ErrorSeverity::Medium,
            ScoutError::CsvError(_) | ScoutError::InputError { .. } => ErrorSeverity::High,
            ScoutError::SerializationError(_) => ErrorSeverity::High,
            ScoutError::IoError(_)
            | ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScoutError::HttpClientError(_) => {
                "Check TLS support and the configured user agent, then retry".to_string()
            }
            ScoutError::CsvError(_) => {
                "Make sure the domain list is valid CSV with a 'domain' header, or one domain per line"
                    .to_string()
            }
            ScoutError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            ScoutError::SerializationError(_) => {
                "Report this as a bug: result records should always serialize".to_string()
            }
            ScoutError::ConfigValidationError { .. } => {
                "Review the configuration file syntax and values".to_string()
            }
            ScoutError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            ScoutError::InvalidDomainError { .. } => {
                "Use bare host names such as 'example.com', without http:// or https://".to_string()
            }
            ScoutError::InputError { .. } => {
                "Check that the domain list contains at least one domain".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Network setup failed: {}", self),
            ErrorCategory::Input => format!("Could not read the domain list: {}", self),
            ErrorCategory::Output => format!("Could not write results: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }

    /// CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
