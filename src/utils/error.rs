use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Qiniu service error ({status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Object not found: {path}")]
    NotFound { path: String },

    #[error("Operation not supported by this adapter: {operation}")]
    Unsupported { operation: &'static str },

    #[error("Remote stream reads are disabled, cannot stream {path}")]
    StreamUnavailable { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl AdapterError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdapterError::NotFound { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, AdapterError::Unsupported { .. })
    }

    pub fn is_stream_unavailable(&self) -> bool {
        matches!(self, AdapterError::StreamUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
