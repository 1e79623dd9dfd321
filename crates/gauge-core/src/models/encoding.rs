use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Tokenization scheme used to count a model family's tokens.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum EncodingId {
    #[default]
    #[serde(rename = "cl100k_base")]
    Cl100kBase,
    #[serde(rename = "o200k_base")]
    O200kBase,
    #[serde(rename = "p50k_base")]
    P50kBase,
}

impl EncodingId {
    pub const ALL: [EncodingId; 3] = [
        EncodingId::Cl100kBase,
        EncodingId::O200kBase,
        EncodingId::P50kBase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingId::Cl100kBase => "cl100k_base",
            EncodingId::O200kBase => "o200k_base",
            EncodingId::P50kBase => "p50k_base",
        }
    }

    /// Parse a wire name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for EncodingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
