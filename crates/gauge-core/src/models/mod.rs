//! Data model shared by the tokens and tracker crates.

pub mod change;
pub mod encoding;
pub mod fragment;
pub mod model_limit;
pub mod snapshot;

pub use change::ChangeSource;
pub use encoding::EncodingId;
pub use fragment::{MessageFragment, Role};
pub use model_limit::ModelLimit;
pub use snapshot::{UsageSnapshot, UsageTier};
