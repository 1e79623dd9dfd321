use tokio::sync::mpsc;

use crate::models::{ChangeSource, EncodingId, MessageFragment, ModelLimit};

/// Stream of opaque "content changed" notifications for the observed region.
pub type ChangeStream = mpsc::UnboundedReceiver<ChangeSource>;

/// Page-specific extraction adapter.
///
/// Owns every selector and model heuristic of a particular chat UI. The
/// tracker never trusts notification payloads; it re-queries extraction
/// through this trait on every pass.
pub trait PageAdapter: Send + Sync {
    /// Subscribe to changes of the observed region.
    ///
    /// Returns `None` while the region cannot be located yet.
    fn subscribe_changes(&self) -> Option<ChangeStream>;

    /// Visible messages of the current conversation, in page order.
    fn extract_fragments(&self) -> Vec<MessageFragment>;

    /// Text currently typed into the input box.
    fn extract_current_input_text(&self) -> String;

    /// Context window of the active model.
    fn current_model_limit(&self) -> ModelLimit;

    /// Identity of the open conversation (its navigable location).
    fn conversation_identity(&self) -> String;

    /// Whether the current location denotes an intentionally new conversation.
    fn is_new_conversation(&self) -> bool {
        false
    }

    /// Encoding matching the active model, if the adapter knows it.
    fn preferred_encoding(&self) -> Option<EncodingId> {
        None
    }
}
