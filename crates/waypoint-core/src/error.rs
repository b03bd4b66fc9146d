use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaypointError {
    // Provider errors
    #[error("provider request failed: {0}")]
    ProviderRequest(String),

    #[error("provider returned HTTP {status}: {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("provider response parse error: {0}")]
    ProviderParse(String),

    #[error("provider returned no completion content")]
    EmptyCompletion,

    // Request errors
    #[error("invalid request body: {0}")]
    InvalidRequest(String),

    // Config errors
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WaypointError>;
