//! EncodingService — one lazily loaded encoder per scheme.
//!
//! Encoders are memoized for the lifetime of the service. Concurrent first
//! requests for a scheme share a single in-flight load.

use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use gauge_core::errors::EncodingError;
use gauge_core::models::EncodingId;
use gauge_observability::tracing_setup::events;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::loader::{EncoderLoader, TiktokenLoader};
use crate::tokenizer::Tokenizer;

type EncoderSlot = Arc<OnceCell<Arc<dyn Tokenizer>>>;

/// Owns the heavy encoder instances.
pub struct EncodingService {
    loader: Arc<dyn EncoderLoader>,
    encoders: DashMap<EncodingId, EncoderSlot>,
}

impl EncodingService {
    /// Service backed by the bundled tiktoken vocabularies.
    pub fn new() -> Self {
        Self::with_loader(Arc::new(TiktokenLoader))
    }

    pub fn with_loader(loader: Arc<dyn EncoderLoader>) -> Self {
        Self {
            loader,
            encoders: DashMap::new(),
        }
    }

    /// Load and memoize the encoder for `encoding`.
    ///
    /// A failed load leaves the scheme uninitialized.
    pub async fn initialize(
        &self,
        encoding: EncodingId,
    ) -> Result<Arc<dyn Tokenizer>, EncodingError> {
        // Clone the slot out so no map guard is held across the await.
        let slot: EncoderSlot = Arc::clone(&*self.encoders.entry(encoding).or_default());
        let loader = Arc::clone(&self.loader);

        let encoder = slot
            .get_or_try_init(|| async move {
                let started = Instant::now();
                debug!(encoding = %encoding, "loading encoder");
                let encoder = tokio::task::spawn_blocking(move || loader.load(encoding))
                    .await
                    .map_err(|e| EncodingError::Unavailable {
                        encoding: encoding.to_string(),
                        reason: e.to_string(),
                    })??;
                events::encoder_loaded(encoding.as_str(), started.elapsed().as_millis());
                Ok::<_, EncodingError>(encoder)
            })
            .await?;

        Ok(Arc::clone(encoder))
    }

    /// Count the tokens of `text` under `encoding`.
    pub async fn count(&self, text: &str, encoding: EncodingId) -> Result<usize, EncodingError> {
        let encoder = self.initialize(encoding).await?;
        Ok(encoder.count(text))
    }

    /// Whether the encoder for `encoding` has finished loading.
    pub fn is_initialized(&self, encoding: EncodingId) -> bool {
        self.encoders
            .get(&encoding)
            .map(|slot| slot.initialized())
            .unwrap_or(false)
    }

    /// Schemes whose encoders are loaded, in a stable order.
    pub fn loaded_encodings(&self) -> Vec<EncodingId> {
        let mut loaded: Vec<EncodingId> = self
            .encoders
            .iter()
            .filter(|entry| entry.value().initialized())
            .map(|entry| *entry.key())
            .collect();
        loaded.sort();
        loaded
    }
}

impl Default for EncodingService {
    fn default() -> Self {
        Self::new()
    }
}
