use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Spreadsheet parsing failed: {0}")]
    ExcelError(#[from] calamine::XlsError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SyncError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::ApiError(_) => ErrorCategory::Network,
            SyncError::ZipError(_)
            | SyncError::ExcelError(_)
            | SyncError::SerializationError(_)
            | SyncError::ProcessingError { .. } => ErrorCategory::Data,
            SyncError::ConfigError { .. }
            | SyncError::MissingConfigError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::ValidationError { .. } => ErrorCategory::Config,
            SyncError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A failed request is recoverable by re-running the sync.
            SyncError::ApiError(_) => ErrorSeverity::Medium,
            SyncError::ZipError(_)
            | SyncError::ExcelError(_)
            | SyncError::SerializationError(_)
            | SyncError::ProcessingError { .. } => ErrorSeverity::High,
            SyncError::ConfigError { .. }
            | SyncError::MissingConfigError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::ValidationError { .. } => ErrorSeverity::High,
            SyncError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SyncError::ApiError(e) if e.is_timeout() => {
                "The remote service did not answer in time; run the sync again later".to_string()
            }
            SyncError::ApiError(e) if e.is_connect() => {
                "Could not reach the remote service; check network connectivity".to_string()
            }
            SyncError::ApiError(e) if e.status().is_some_and(|s| s.as_u16() == 403) => {
                "The Ozon API rejected the credentials; verify CLIENT_ID and SELLER_TOKEN"
                    .to_string()
            }
            SyncError::ApiError(_) => {
                "Check that the Ozon Seller API and the stock site are reachable".to_string()
            }
            SyncError::ZipError(_) | SyncError::ExcelError(_) => {
                "The stock archive layout may have changed; inspect the downloaded file manually"
                    .to_string()
            }
            SyncError::SerializationError(_) => {
                "The API response shape may have changed; check the Ozon Seller API changelog"
                    .to_string()
            }
            SyncError::ConfigError { .. }
            | SyncError::MissingConfigError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::ValidationError { .. } => {
                "Fix the configuration and run again (see --help)".to_string()
            }
            SyncError::ProcessingError { .. } => {
                "Inspect the inventory data for unexpected values".to_string()
            }
            SyncError::IoError(_) => "Check filesystem permissions and disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Data => format!("Data problem: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
