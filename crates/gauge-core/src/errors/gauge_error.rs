use super::{AdapterError, BridgeError, ConfigError, EncodingError};

/// Top-level error aggregating every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum GaugeError {
    #[error("encoding error: {0}")]
    EncodingError(#[from] EncodingError),

    #[error("bridge error: {0}")]
    BridgeError(#[from] BridgeError),

    #[error("adapter error: {0}")]
    AdapterError(#[from] AdapterError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience result alias.
pub type GaugeResult<T> = Result<T, GaugeError>;
