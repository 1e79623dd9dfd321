//! # gauge-tokens
//!
//! Token counting for the usage tracker, split across an execution-context
//! boundary.
//!
//! ```text
//! RequestBridge ──frames──▶ EncodingWorker ──▶ EncodingService
//!   (tracker side)   mpsc     (service side)     (memoized tiktoken encoders)
//!        │
//!        └─ fallback_estimate on any failure
//! ```

pub mod bridge;
pub mod channel;
pub mod fallback;
pub mod loader;
pub mod protocol;
pub mod service;
pub mod tokenizer;
pub mod worker;

pub use bridge::{BridgedCount, CountSource, RequestBridge};
pub use channel::{channel, BridgePort, ServicePort};
pub use fallback::fallback_estimate;
pub use loader::{EncoderLoader, TiktokenLoader};
pub use protocol::{CountRequest, CountResponse};
pub use service::EncodingService;
pub use tokenizer::Tokenizer;
pub use worker::EncodingWorker;
