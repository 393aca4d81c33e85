use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data source error ({source_name}): {message}")]
    DataSource {
        source_name: String,
        message: String,
    },

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ProcessingError {
    pub fn data_source(source_name: &str, message: impl std::fmt::Display) -> Self {
        ProcessingError::DataSource {
            source_name: source_name.to_string(),
            message: message.to_string(),
        }
    }

    /// True for failures that mean the raw data could not be obtained or parsed.
    pub fn is_data_source(&self) -> bool {
        matches!(self, ProcessingError::DataSource { .. })
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(self, ProcessingError::DataIntegrity(_))
    }
}
