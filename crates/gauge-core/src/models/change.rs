use serde::{Deserialize, Serialize};

/// Kind of an opaque "content changed" notification.
///
/// Carries no payload; it only selects the debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSource {
    /// The conversation content was mutated (messages added, streamed, edited).
    Mutation,
    /// The user typed into the input box.
    Input,
}
