use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown service: {id}")]
    UnknownService { id: String },

    #[error("Unknown payment method: {id}")]
    UnknownPayment { id: String },

    #[error("Invalid form event '{line}': {reason}")]
    InvalidEvent { line: String, reason: String },
}

impl QuoteError {
    /// Whether the error comes from user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            QuoteError::UnknownService { .. }
                | QuoteError::UnknownPayment { .. }
                | QuoteError::InvalidEvent { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
