//! Message-passing boundary between the tracker and the encoding service.
//!
//! Both directions are unbounded queues of text frames, so requests sent
//! before the service side starts reading wait in the queue until it does.

use tokio::sync::mpsc;

/// Requesting side of the boundary.
pub struct BridgePort {
    pub requests: mpsc::UnboundedSender<String>,
    pub responses: mpsc::UnboundedReceiver<String>,
}

/// Responding side of the boundary.
pub struct ServicePort {
    pub requests: mpsc::UnboundedReceiver<String>,
    pub responses: mpsc::UnboundedSender<String>,
}

/// Create a connected pair of ports.
pub fn channel() -> (BridgePort, ServicePort) {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (response_tx, response_rx) = mpsc::unbounded_channel();
    (
        BridgePort {
            requests: request_tx,
            responses: response_rx,
        },
        ServicePort {
            requests: request_rx,
            responses: response_tx,
        },
    )
}
