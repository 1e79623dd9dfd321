//! Encoder loading. Loading is the heavy, failure-prone step; counting with a
//! loaded encoder is cheap and infallible.

use std::sync::Arc;

use gauge_core::errors::EncodingError;
use gauge_core::models::EncodingId;

use crate::tokenizer::Tokenizer;

/// Builds the encoder for one scheme. Called from the blocking pool.
pub trait EncoderLoader: Send + Sync {
    fn load(&self, encoding: EncodingId) -> Result<Arc<dyn Tokenizer>, EncodingError>;
}

/// Loads the BPE vocabularies bundled with `tiktoken-rs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiktokenLoader;

impl EncoderLoader for TiktokenLoader {
    fn load(&self, encoding: EncodingId) -> Result<Arc<dyn Tokenizer>, EncodingError> {
        let bpe = match encoding {
            EncodingId::Cl100kBase => tiktoken_rs::cl100k_base(),
            EncodingId::O200kBase => tiktoken_rs::o200k_base(),
            EncodingId::P50kBase => tiktoken_rs::p50k_base(),
        }
        .map_err(|e| EncodingError::Unavailable {
            encoding: encoding.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Arc::new(bpe))
    }
}
