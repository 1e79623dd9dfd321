use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::EncodingId;

/// Encoding selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokensConfig {
    /// Encoding used when the adapter reports no preference.
    pub default_encoding: EncodingId,
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            default_encoding: EncodingId::parse(defaults::DEFAULT_ENCODING)
                .unwrap_or_default(),
        }
    }
}
