/// Encoding service errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("encoding {encoding} unavailable: {reason}")]
    Unavailable { encoding: String, reason: String },

    #[error("unsupported encoding: {name}")]
    Unsupported { name: String },
}
