use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted message: the unit of tokenization.
///
/// Produced fresh on every extraction pass and never kept across passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessageFragment {
    pub role: Role,
    pub raw_text: String,
}

impl MessageFragment {
    pub fn new(role: Role, raw_text: impl Into<String>) -> Self {
        Self {
            role,
            raw_text: raw_text.into(),
        }
    }

    pub fn user(raw_text: impl Into<String>) -> Self {
        Self::new(Role::User, raw_text)
    }

    pub fn assistant(raw_text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, raw_text)
    }
}
