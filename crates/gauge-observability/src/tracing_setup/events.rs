//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log the start of a tracking session.
pub fn session_started(session_id: &str, identity: &str) {
    tracing::info!(
        event = "session_started",
        session_id = %session_id,
        identity = %identity,
        "session started"
    );
}

/// Log a session reset caused by a conversation identity change.
pub fn session_reset(previous: &str, next: &str, evicted_entries: usize) {
    tracing::info!(
        event = "session_reset",
        previous = %previous,
        next = %next,
        evicted_entries = evicted_entries,
        "session reset"
    );
}

/// Log a completed recompute pass.
pub fn pass_completed(
    session_id: &str,
    fragments: usize,
    cache_hits: usize,
    requests: usize,
    current_tokens: u64,
    is_loading: bool,
) {
    tracing::debug!(
        event = "pass_completed",
        session_id = %session_id,
        fragments = fragments,
        cache_hits = cache_hits,
        requests = requests,
        current_tokens = current_tokens,
        is_loading = is_loading,
        "recompute pass completed"
    );
}

/// Log a count that fell back to the character estimate.
pub fn fallback_used(reason: &str, estimate: usize) {
    tracing::debug!(
        event = "fallback_used",
        reason = %reason,
        estimate = estimate,
        "count fell back to estimate"
    );
}

/// Log the bridge entering degraded mode.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log the bridge leaving degraded mode.
pub fn degradation_recovered(component: &str) {
    tracing::info!(
        event = "degradation_recovered",
        component = %component,
        "degradation recovered"
    );
}

/// Log that the observed region could not be located.
pub fn discovery_exhausted(session_id: &str, attempts: u32) {
    tracing::debug!(
        event = "discovery_exhausted",
        session_id = %session_id,
        attempts = attempts,
        "observed region not found, giving up"
    );
}

/// Log an encoder finishing its lazy load.
pub fn encoder_loaded(encoding: &str, elapsed_ms: u128) {
    tracing::info!(
        event = "encoder_loaded",
        encoding = %encoding,
        elapsed_ms = elapsed_ms as u64,
        "encoder loaded"
    );
}
