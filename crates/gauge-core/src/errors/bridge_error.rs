/// Request bridge errors. None of these reach the presentation layer; the
/// bridge recovers from every one of them with the fallback estimate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("no response to request {request_id} within {timeout_ms}ms")]
    ChannelTimeout { request_id: u64, timeout_ms: u64 },

    #[error("channel closed before request {request_id} was answered")]
    ChannelClosed { request_id: u64 },

    #[error("bridge has no channel to an encoding service")]
    Detached,

    #[error("encoding service failed request {request_id}: {message}")]
    Service { request_id: u64, message: String },

    #[error("frame codec error: {reason}")]
    Codec { reason: String },
}
