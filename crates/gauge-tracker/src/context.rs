//! SessionContext — identity and bookkeeping for one tracked conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who a session is tracking and since when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Random instance id, unique per session, used in logs.
    pub session_id: String,
    /// Conversation identity (the page's navigable location).
    pub identity: String,
    /// When this session was created.
    pub started_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            identity: identity.into(),
            started_at: Utc::now(),
        }
    }

    /// Whether this session tracks `identity`.
    pub fn tracks(&self, identity: &str) -> bool {
        self.identity == identity
    }
}
