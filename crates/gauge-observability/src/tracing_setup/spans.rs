//! Span definitions per operation: session, recompute pass, count request.
//!
//! Each span carries its identifying metadata via the `tracing` crate.

/// Create a session span.
#[macro_export]
macro_rules! session_span {
    ($session_id:expr, $identity:expr) => {
        tracing::info_span!("gauge.session", session_id = %$session_id, identity = %$identity)
    };
}

/// Create a recompute pass span.
#[macro_export]
macro_rules! recompute_span {
    ($session_id:expr, $pass:expr) => {
        tracing::debug_span!("gauge.recompute", session_id = %$session_id, pass = $pass)
    };
}

/// Create a count request span.
#[macro_export]
macro_rules! count_span {
    ($request_id:expr, $encoding:expr) => {
        tracing::trace_span!("gauge.count", request_id = $request_id, encoding = %$encoding)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SESSION: &str = "gauge.session";
    pub const RECOMPUTE: &str = "gauge.recompute";
    pub const COUNT: &str = "gauge.count";
}
