//! Session actor — one task per tracked conversation.
//!
//! The actor alone owns the scheduler, discovery and lifecycle state of its
//! session. Recomputation passes run on a child task so the actor keeps
//! receiving notifications while counts are in flight; at most one pass runs
//! at a time.

use std::collections::HashMap;
use std::future::pending;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gauge_core::errors::AdapterError;
use gauge_core::models::{ChangeSource, EncodingId};
use gauge_core::traits::{ChangeStream, PageAdapter};
use gauge_core::GaugeConfig;
use gauge_observability::tracing_setup::events;
use gauge_observability::{recompute_span, session_span, PipelineMetrics};
use gauge_tokens::{BridgedCount, RequestBridge};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn, Instrument};

use crate::cache::{fingerprint, TokenCache};
use crate::classifier::{classify, loading_snapshot};
use crate::context::SessionContext;
use crate::gate::SnapshotGate;
use crate::lifecycle::SessionLifecycle;
use crate::scheduler::{DiscoveryRetry, RecalcScheduler};

/// Everything a session needs that outlives it.
pub(crate) struct TrackerShared {
    pub(crate) adapter: Arc<dyn PageAdapter>,
    pub(crate) bridge: RequestBridge,
    pub(crate) gate: SnapshotGate,
    pub(crate) config: GaugeConfig,
    pub(crate) metrics: Arc<PipelineMetrics>,
}

pub(crate) enum SessionCommand {
    Notify(ChangeSource),
}

/// Handle to a running session actor. Dropping it aborts the actor.
pub(crate) struct SessionHandle {
    pub(crate) context: SessionContext,
    pub(crate) cache: Arc<Mutex<TokenCache>>,
    commands: mpsc::UnboundedSender<SessionCommand>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Spawn the actor for `context`. Must be called within a tokio runtime.
    pub(crate) fn spawn(
        context: SessionContext,
        shared: Arc<TrackerShared>,
        generation: u64,
    ) -> Self {
        let cache = Arc::new(Mutex::new(TokenCache::new(&shared.config.cache)));
        let (commands, command_rx) = mpsc::unbounded_channel();
        let span = session_span!(context.session_id, context.identity);

        let actor = SessionActor {
            session_id: context.session_id.clone(),
            scheduler: RecalcScheduler::new(&shared.config.scheduler),
            discovery: DiscoveryRetry::new(&shared.config.scheduler),
            lifecycle: SessionLifecycle::new(),
            cache: Arc::clone(&cache),
            commands: command_rx,
            shared,
            generation,
            passes_started: 0,
        };
        let task = tokio::spawn(actor.run().instrument(span));

        Self {
            context,
            cache,
            commands,
            task,
        }
    }

    /// Forward a change notification. Returns false if the actor is gone.
    pub(crate) fn notify(&self, source: ChangeSource) -> bool {
        self.commands.send(SessionCommand::Notify(source)).is_ok()
    }

    /// Abort the actor and clear the cache. Returns the number of evicted entries.
    pub(crate) fn teardown(&self) -> usize {
        self.task.abort();
        let mut cache = lock(&self.cache);
        let evicted = cache.len();
        cache.clear();
        evicted
    }

    pub(crate) fn cache_len(&self) -> usize {
        lock(&self.cache).len()
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// What a pass found, handed back to the actor.
#[derive(Debug)]
struct PassOutcome {
    fragments: usize,
    current_tokens: u64,
    max_tokens: u64,
    estimated: bool,
    is_new_conversation: bool,
    cache_hits: usize,
    requests: usize,
}

struct SessionActor {
    session_id: String,
    scheduler: RecalcScheduler,
    discovery: DiscoveryRetry,
    lifecycle: SessionLifecycle,
    cache: Arc<Mutex<TokenCache>>,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    shared: Arc<TrackerShared>,
    generation: u64,
    passes_started: u64,
}

impl SessionActor {
    async fn run(mut self) {
        let mut changes: Option<ChangeStream> = None;
        let mut next_discovery: Option<Instant> = Some(Instant::now());
        // Dropping the actor drops this set, aborting an in-flight pass.
        let mut passes: JoinSet<PassOutcome> = JoinSet::new();

        loop {
            let deadline = self.scheduler.deadline();

            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(SessionCommand::Notify(source)) => {
                        self.scheduler.notify(source, Instant::now());
                    }
                    None => break,
                },
                change = next_change(&mut changes) => match change {
                    Some(source) => self.scheduler.notify(source, Instant::now()),
                    None => {
                        debug!(session_id = %self.session_id, "change stream ended, rediscovering");
                        changes = None;
                        self.discovery.reset();
                        next_discovery =
                            Some(Instant::now() + self.shared.config.scheduler.discovery_interval());
                    }
                },
                _ = sleep_until_opt(deadline) => {
                    if self.scheduler.fire() {
                        self.start_pass(&mut passes);
                    }
                }
                _ = sleep_until_opt(next_discovery) => {
                    next_discovery = None;
                    match self.shared.adapter.subscribe_changes() {
                        Some(stream) => {
                            debug!(
                                session_id = %self.session_id,
                                attempts = self.discovery.attempts() + 1,
                                "observed region found"
                            );
                            changes = Some(stream);
                            self.discovery.reset();
                            self.scheduler.notify(ChangeSource::Mutation, Instant::now());
                        }
                        None => match self.discovery.record_failure() {
                            Some(delay) => next_discovery = Some(Instant::now() + delay),
                            None => self.give_up_discovery(),
                        },
                    }
                }
                Some(joined) = passes.join_next(), if !passes.is_empty() => {
                    match joined {
                        Ok(outcome) => self.finish_pass(outcome),
                        Err(e) => warn!(session_id = %self.session_id, error = %e, "recompute pass failed"),
                    }
                    if self.scheduler.complete() {
                        self.start_pass(&mut passes);
                    }
                }
            }
        }

        debug!(session_id = %self.session_id, "session actor stopped");
    }

    fn start_pass(&mut self, passes: &mut JoinSet<PassOutcome>) {
        self.passes_started += 1;
        let span = recompute_span!(self.session_id, self.passes_started);
        passes.spawn(
            compute_pass(Arc::clone(&self.shared), Arc::clone(&self.cache)).instrument(span),
        );
    }

    fn finish_pass(&mut self, outcome: PassOutcome) {
        if self.lifecycle.observe_pass(outcome.fragments, outcome.is_new_conversation) {
            debug!(session_id = %self.session_id, fragments = outcome.fragments, "session settled");
        }

        let snapshot = if self.lifecycle.is_loading() {
            loading_snapshot(outcome.max_tokens)
        } else {
            let mut snapshot = classify(outcome.current_tokens, outcome.max_tokens);
            snapshot.estimated = outcome.estimated;
            snapshot
        };

        let metrics = &self.shared.metrics;
        metrics.record_pass();
        metrics.record_cache_lookups(
            outcome.cache_hits as u64,
            outcome.fragments.saturating_sub(outcome.cache_hits) as u64,
        );
        events::pass_completed(
            &self.session_id,
            outcome.fragments,
            outcome.cache_hits,
            outcome.requests,
            snapshot.current_tokens,
            snapshot.is_loading,
        );

        self.shared.gate.emit(self.generation, snapshot);
    }

    fn give_up_discovery(&self) {
        let attempts = self.discovery.attempts();
        let err = AdapterError::Unresolvable { attempts };
        debug!(session_id = %self.session_id, error = %err, "discovery stopped");
        events::discovery_exhausted(&self.session_id, attempts);
        self.shared.metrics.record_discovery_failure();
    }
}

/// A distinct text counted through the bridge in one pass.
#[derive(Default)]
struct CountTarget {
    /// Cache keys of every missed fragment with this exact text.
    keys: Vec<String>,
    /// The current input box has this text too. Never cached.
    input: bool,
}

impl CountTarget {
    fn occurrences(&self) -> usize {
        self.keys.len() + usize::from(self.input)
    }
}

/// One recomputation pass: extract, look up, count misses concurrently,
/// aggregate. Only exact counts are written back to the cache.
async fn compute_pass(shared: Arc<TrackerShared>, cache: Arc<Mutex<TokenCache>>) -> PassOutcome {
    let adapter = &shared.adapter;
    let fragments = adapter.extract_fragments();
    let input = adapter.extract_current_input_text();
    let max_tokens = shared.config.usage.resolve_limit(adapter.current_model_limit());
    let is_new_conversation = adapter.is_new_conversation();
    let encoding: EncodingId = adapter
        .preferred_encoding()
        .unwrap_or(shared.config.tokens.default_encoding);
    let prefix_chars = shared.config.cache.key_prefix_chars;

    let mut current_tokens: u64 = 0;
    let mut cache_hits = 0;
    let mut misses: HashMap<String, CountTarget> = HashMap::new();
    {
        let cache = lock(&cache);
        for fragment in &fragments {
            let key = fingerprint(fragment.role, &fragment.raw_text, prefix_chars);
            match cache.get(&key) {
                Some(count) => {
                    cache_hits += 1;
                    current_tokens += count as u64;
                }
                None => misses
                    .entry(fragment.raw_text.clone())
                    .or_default()
                    .keys
                    .push(key),
            }
        }
    }
    if !input.is_empty() {
        misses.entry(input).or_default().input = true;
    }

    let mut requests: JoinSet<(CountTarget, BridgedCount)> = JoinSet::new();
    for (text, target) in misses {
        let bridge = shared.bridge.clone();
        requests.spawn(async move {
            let count = bridge.request_count(&text, encoding).await;
            (target, count)
        });
    }
    let issued = requests.len();

    let mut estimated = false;
    let mut exact: Vec<(String, usize)> = Vec::new();
    while let Some(joined) = requests.join_next().await {
        match joined {
            Ok((target, count)) => {
                estimated |= !count.is_exact();
                current_tokens += (count.tokens * target.occurrences()) as u64;
                if count.is_exact() {
                    exact.extend(target.keys.into_iter().map(|key| (key, count.tokens)));
                }
            }
            Err(e) => {
                estimated = true;
                warn!(error = %e, "count request task failed");
            }
        }
    }

    if !exact.is_empty() {
        let mut cache = lock(&cache);
        for (key, tokens) in exact {
            cache.put(key, tokens);
        }
    }

    PassOutcome {
        fragments: fragments.len(),
        current_tokens,
        max_tokens,
        estimated,
        is_new_conversation,
        cache_hits,
        requests: issued,
    }
}

async fn next_change(changes: &mut Option<ChangeStream>) -> Option<ChangeSource> {
    match changes {
        Some(stream) => stream.recv().await,
        None => pending().await,
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending().await,
    }
}

pub(crate) fn lock(cache: &Mutex<TokenCache>) -> MutexGuard<'_, TokenCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}
