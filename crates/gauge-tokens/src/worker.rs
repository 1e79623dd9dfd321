//! EncodingWorker — the responding side of the bridge.

use std::sync::Arc;

use gauge_core::errors::EncodingError;
use gauge_core::models::EncodingId;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::channel::ServicePort;
use crate::protocol::{decode_frame, encode_frame, CountRequest, CountResponse};
use crate::service::EncodingService;

/// Serves count requests from a [`ServicePort`].
pub struct EncodingWorker;

impl EncodingWorker {
    /// Serve `port` on a background task until the request side closes.
    pub fn spawn(service: Arc<EncodingService>, port: ServicePort) -> JoinHandle<()> {
        tokio::spawn(Self::serve(service, port))
    }

    /// Serve requests concurrently. Undecodable frames are skipped.
    pub async fn serve(service: Arc<EncodingService>, port: ServicePort) {
        let ServicePort {
            mut requests,
            responses,
        } = port;

        while let Some(frame) = requests.recv().await {
            let request: CountRequest = match decode_frame(&frame) {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "dropping undecodable request frame");
                    continue;
                }
            };

            let service = Arc::clone(&service);
            let responses = responses.clone();
            tokio::spawn(async move {
                let id = request.id;
                let response = match count(&service, request.text, request.encoding).await {
                    Ok(tokens) => CountResponse::success(id, tokens),
                    Err(e) => CountResponse::failure(id, e.to_string()),
                };
                match encode_frame(&response) {
                    Ok(frame) => {
                        if responses.send(frame).is_err() {
                            debug!(request_id = id, "requesting side gone, response dropped");
                        }
                    }
                    Err(e) => warn!(request_id = id, error = %e, "failed to encode response"),
                }
            });
        }

        debug!("request channel closed, worker stopping");
    }
}

/// Count on the blocking pool once the encoder is available.
async fn count(
    service: &EncodingService,
    text: String,
    encoding: EncodingId,
) -> Result<usize, EncodingError> {
    let encoder = service.initialize(encoding).await?;
    tokio::task::spawn_blocking(move || encoder.count(&text))
        .await
        .map_err(|e| EncodingError::Unavailable {
            encoding: encoding.to_string(),
            reason: e.to_string(),
        })
}
