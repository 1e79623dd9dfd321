//! RequestBridge — correlated count requests with timeout and fallback.
//!
//! Every request gets a fresh id and a oneshot slot in the pending table. A
//! response pump routes incoming frames to their slot by id. Whatever goes
//! wrong, the caller receives a number: the exact count, or the character
//! estimate marked as [`CountSource::Fallback`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};

use gauge_core::config::BridgeConfig;
use gauge_core::errors::BridgeError;
use gauge_core::models::EncodingId;
use gauge_observability::tracing_setup::events;
use gauge_observability::PipelineMetrics;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn, Instrument};

use crate::channel::{channel, BridgePort};
use crate::fallback::fallback_estimate;
use crate::protocol::{decode_frame, encode_frame, CountRequest, CountResponse};
use crate::service::EncodingService;
use crate::worker::EncodingWorker;

const COMPONENT: &str = "encoder";
const FALLBACK_NAME: &str = "char_estimate";

/// Where a count came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    /// Answered by the encoding service.
    Encoder,
    /// Character estimate; must not be cached as authoritative.
    Fallback,
}

/// Result of a bridged count request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgedCount {
    pub tokens: usize,
    pub source: CountSource,
}

impl BridgedCount {
    pub fn exact(tokens: usize) -> Self {
        Self {
            tokens,
            source: CountSource::Encoder,
        }
    }

    pub fn fallback(tokens: usize) -> Self {
        Self {
            tokens,
            source: CountSource::Fallback,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.source == CountSource::Encoder
    }
}

/// A request awaiting its response.
struct PendingCount {
    reply: oneshot::Sender<CountResponse>,
    encoding: EncodingId,
    issued_at: Instant,
}

type PendingTable = Mutex<HashMap<u64, PendingCount>>;

/// Removes its request from the pending table when the caller finishes or
/// is cancelled. Ids are never reused, so a second removal is a no-op.
struct PendingSlot<'a> {
    table: &'a PendingTable,
    id: u64,
}

impl Drop for PendingSlot<'_> {
    fn drop(&mut self) {
        lock(self.table).remove(&self.id);
    }
}

struct BridgeInner {
    requests: Option<mpsc::UnboundedSender<String>>,
    pending: Arc<PendingTable>,
    next_id: AtomicU64,
    timeout: Duration,
    degraded: AtomicBool,
    metrics: Arc<PipelineMetrics>,
    pump: Option<JoinHandle<()>>,
}

impl Drop for BridgeInner {
    fn drop(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
    }
}

/// Cheaply cloneable handle to the requesting side of the boundary.
#[derive(Clone)]
pub struct RequestBridge {
    inner: Arc<BridgeInner>,
}

impl RequestBridge {
    /// Attach to a port. Must be called within a tokio runtime.
    pub fn connect(port: BridgePort, config: &BridgeConfig, metrics: Arc<PipelineMetrics>) -> Self {
        let BridgePort {
            requests,
            responses,
        } = port;
        let pending: Arc<PendingTable> = Arc::new(Mutex::new(HashMap::new()));
        let pump = tokio::spawn(pump_responses(responses, Arc::downgrade(&pending)));

        Self {
            inner: Arc::new(BridgeInner {
                requests: Some(requests),
                pending,
                next_id: AtomicU64::new(1),
                timeout: config.request_timeout(),
                degraded: AtomicBool::new(false),
                metrics,
                pump: Some(pump),
            }),
        }
    }

    /// A bridge with no channel at all. Every request falls back.
    pub fn detached(config: &BridgeConfig, metrics: Arc<PipelineMetrics>) -> Self {
        Self {
            inner: Arc::new(BridgeInner {
                requests: None,
                pending: Arc::new(Mutex::new(HashMap::new())),
                next_id: AtomicU64::new(1),
                timeout: config.request_timeout(),
                degraded: AtomicBool::new(false),
                metrics,
                pump: None,
            }),
        }
    }

    /// Run the encoding service on a worker task inside this process and
    /// connect to it. The worker stops once every bridge clone is dropped.
    pub fn in_process(
        service: Arc<EncodingService>,
        config: &BridgeConfig,
        metrics: Arc<PipelineMetrics>,
    ) -> Self {
        let (bridge_port, service_port) = channel();
        EncodingWorker::spawn(service, service_port);
        Self::connect(bridge_port, config, metrics)
    }

    /// Count `text` under `encoding`. Never fails.
    pub async fn request_count(&self, text: &str, encoding: EncodingId) -> BridgedCount {
        match self.try_count(text, encoding).await {
            Ok(tokens) => {
                self.inner.metrics.record_exact();
                if self.inner.degraded.swap(false, Ordering::AcqRel) {
                    events::degradation_recovered(COMPONENT);
                }
                BridgedCount::exact(tokens)
            }
            Err(err) => {
                if matches!(err, BridgeError::ChannelTimeout { .. }) {
                    self.inner.metrics.record_timeout();
                }
                self.inner.metrics.record_fallback();
                let estimate = fallback_estimate(text);
                let reason = err.to_string();
                events::fallback_used(&reason, estimate);
                if !self.inner.degraded.swap(true, Ordering::AcqRel) {
                    events::degradation_triggered(COMPONENT, &reason, FALLBACK_NAME);
                }
                BridgedCount::fallback(estimate)
            }
        }
    }

    /// Whether the last request fell back.
    pub fn is_degraded(&self) -> bool {
        self.inner.degraded.load(Ordering::Acquire)
    }

    /// Requests currently awaiting a response.
    pub fn pending_count(&self) -> usize {
        lock(&self.inner.pending).len()
    }

    pub fn metrics(&self) -> &Arc<PipelineMetrics> {
        &self.inner.metrics
    }

    async fn try_count(&self, text: &str, encoding: EncodingId) -> Result<usize, BridgeError> {
        let requests = self.inner.requests.as_ref().ok_or(BridgeError::Detached)?;
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let span = gauge_observability::count_span!(id, encoding);

        async move {
            let frame = encode_frame(&CountRequest {
                id,
                text: text.to_string(),
                encoding,
            })?;

            let (reply, response) = oneshot::channel();
            lock(&self.inner.pending).insert(
                id,
                PendingCount {
                    reply,
                    encoding,
                    issued_at: Instant::now(),
                },
            );
            let _slot = PendingSlot {
                table: &self.inner.pending,
                id,
            };

            if requests.send(frame).is_err() {
                return Err(BridgeError::ChannelClosed { request_id: id });
            }

            match tokio::time::timeout(self.inner.timeout, response).await {
                Ok(Ok(response)) => response
                    .into_result()
                    .map_err(|message| BridgeError::Service {
                        request_id: id,
                        message,
                    }),
                Ok(Err(_)) => Err(BridgeError::ChannelClosed { request_id: id }),
                // Late responses for this id are discarded by the pump.
                Err(_) => Err(BridgeError::ChannelTimeout {
                    request_id: id,
                    timeout_ms: self.inner.timeout.as_millis() as u64,
                }),
            }
        }
        .instrument(span)
        .await
    }
}

/// Route response frames to their pending slot until either side goes away.
async fn pump_responses(mut responses: mpsc::UnboundedReceiver<String>, pending: Weak<PendingTable>) {
    while let Some(frame) = responses.recv().await {
        let response: CountResponse = match decode_frame(&frame) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "dropping undecodable response frame");
                continue;
            }
        };

        let Some(table) = pending.upgrade() else {
            debug!(request_id = response.id, "requesting side gone, response dropped");
            return;
        };
        let slot = lock(&table).remove(&response.id);
        match slot {
            Some(slot) => {
                trace!(
                    request_id = response.id,
                    encoding = %slot.encoding,
                    latency_ms = slot.issued_at.elapsed().as_millis() as u64,
                    "response routed"
                );
                // The requester may have stopped waiting; that is fine.
                let _ = slot.reply.send(response);
            }
            None => debug!(request_id = response.id, "late or unknown response dropped"),
        }
    }

    // Service side closed: release every waiter now instead of at its timeout.
    if let Some(table) = pending.upgrade() {
        lock(&table).clear();
    }
}

fn lock(table: &PendingTable) -> MutexGuard<'_, HashMap<u64, PendingCount>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}
