//! Shared fixtures: a scripted page adapter and a scripted encoding service.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gauge_core::config::BridgeConfig;
use gauge_core::models::{ChangeSource, EncodingId, MessageFragment, ModelLimit, UsageSnapshot};
use gauge_core::traits::{ChangeStream, PageAdapter};
use gauge_observability::PipelineMetrics;
use gauge_tokens::protocol::{decode_frame, encode_frame};
use gauge_tokens::{channel, CountRequest, CountResponse, RequestBridge};
use tokio::sync::mpsc;

// --- Page adapter ---

struct PageState {
    fragments: Vec<MessageFragment>,
    input: String,
    limit: ModelLimit,
    identity: String,
    new_conversation: bool,
    encoding: Option<EncodingId>,
}

/// In-memory page whose content tests mutate directly.
pub struct ScriptedAdapter {
    state: Mutex<PageState>,
    changes: Mutex<Option<mpsc::UnboundedSender<ChangeSource>>>,
    failing_subscribes: AtomicU32,
    subscribe_calls: AtomicU32,
}

impl ScriptedAdapter {
    pub fn new(identity: &str) -> Self {
        Self {
            state: Mutex::new(PageState {
                fragments: Vec::new(),
                input: String::new(),
                limit: ModelLimit::Tokens(10),
                identity: identity.to_string(),
                new_conversation: false,
                encoding: None,
            }),
            changes: Mutex::new(None),
            failing_subscribes: AtomicU32::new(0),
            subscribe_calls: AtomicU32::new(0),
        }
    }

    /// The observed region is missing for the first `attempts` subscriptions.
    pub fn hide_region_for(self, attempts: u32) -> Self {
        self.failing_subscribes.store(attempts, Ordering::SeqCst);
        self
    }

    pub fn set_fragments(&self, fragments: Vec<MessageFragment>) {
        self.state.lock().unwrap().fragments = fragments;
    }

    pub fn set_input(&self, input: &str) {
        self.state.lock().unwrap().input = input.to_string();
    }

    pub fn set_limit(&self, limit: ModelLimit) {
        self.state.lock().unwrap().limit = limit;
    }

    pub fn set_identity(&self, identity: &str) {
        self.state.lock().unwrap().identity = identity.to_string();
    }

    pub fn set_new_conversation(&self, new_conversation: bool) {
        self.state.lock().unwrap().new_conversation = new_conversation;
    }

    pub fn set_encoding(&self, encoding: EncodingId) {
        self.state.lock().unwrap().encoding = Some(encoding);
    }

    /// Fire a change notification on the current subscription.
    pub fn push_change(&self, source: ChangeSource) -> bool {
        self.changes
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|tx| tx.send(source).is_ok())
    }

    pub fn subscribe_calls(&self) -> u32 {
        self.subscribe_calls.load(Ordering::SeqCst)
    }
}

impl PageAdapter for ScriptedAdapter {
    fn subscribe_changes(&self) -> Option<ChangeStream> {
        let call = self.subscribe_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failing_subscribes.load(Ordering::SeqCst) {
            return None;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        *self.changes.lock().unwrap() = Some(tx);
        Some(rx)
    }

    fn extract_fragments(&self) -> Vec<MessageFragment> {
        self.state.lock().unwrap().fragments.clone()
    }

    fn extract_current_input_text(&self) -> String {
        self.state.lock().unwrap().input.clone()
    }

    fn current_model_limit(&self) -> ModelLimit {
        self.state.lock().unwrap().limit
    }

    fn conversation_identity(&self) -> String {
        self.state.lock().unwrap().identity.clone()
    }

    fn is_new_conversation(&self) -> bool {
        self.state.lock().unwrap().new_conversation
    }

    fn preferred_encoding(&self) -> Option<EncodingId> {
        self.state.lock().unwrap().encoding
    }
}

// --- Encoding service ---

/// Fixed counts for the texts used across tests; word count otherwise.
pub fn table_count(text: &str) -> usize {
    match text {
        "Hello" => 1,
        "Hi there!" => 3,
        "More" => 1,
        other => other.split_whitespace().count(),
    }
}

/// Answers count requests from [`table_count`] after `delay`.
pub struct ScriptedService {
    pub bridge: RequestBridge,
    served: Arc<AtomicUsize>,
    encodings: Arc<Mutex<Vec<EncodingId>>>,
}

impl ScriptedService {
    pub fn start(delay: Duration) -> Self {
        let (bridge_port, mut service_port) = channel();
        let served = Arc::new(AtomicUsize::new(0));
        let encodings = Arc::new(Mutex::new(Vec::new()));

        let served_by_worker = Arc::clone(&served);
        let seen = Arc::clone(&encodings);
        tokio::spawn(async move {
            while let Some(frame) = service_port.requests.recv().await {
                let request: CountRequest = decode_frame(&frame).unwrap();
                served_by_worker.fetch_add(1, Ordering::SeqCst);
                seen.lock().unwrap().push(request.encoding);

                let responses = service_port.responses.clone();
                tokio::spawn(async move {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    let response =
                        CountResponse::success(request.id, table_count(&request.text));
                    let _ = responses.send(encode_frame(&response).unwrap());
                });
            }
        });

        let bridge = RequestBridge::connect(
            bridge_port,
            &BridgeConfig::default(),
            Arc::new(PipelineMetrics::new()),
        );
        Self {
            bridge,
            served,
            encodings,
        }
    }

    pub fn served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }

    pub fn encodings(&self) -> Vec<EncodingId> {
        self.encodings.lock().unwrap().clone()
    }
}

// --- Snapshot collection ---

/// Drain every snapshot delivered so far.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<UsageSnapshot>) -> Vec<UsageSnapshot> {
    let mut out = Vec::new();
    while let Ok(snapshot) = rx.try_recv() {
        out.push(snapshot);
    }
    out
}

/// Let debounce windows, discovery timers and counts play out.
pub async fn settle() {
    tokio::time::sleep(Duration::from_secs(2)).await;
}
