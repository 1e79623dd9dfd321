// Single source of truth for all default values.

// --- Tokens ---
pub const DEFAULT_ENCODING: &str = "cl100k_base";

// --- Bridge ---
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

// --- Cache ---
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1_000;
pub const DEFAULT_CACHE_RETAIN_ENTRIES: usize = 500;
pub const DEFAULT_KEY_PREFIX_CHARS: usize = 100;

// --- Scheduler ---
pub const DEFAULT_MUTATION_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_INPUT_DEBOUNCE_MS: u64 = 150;
pub const DEFAULT_DISCOVERY_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_DISCOVERY_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_NAVIGATION_POLL_MS: u64 = 500;

// --- Usage ---
pub const DEFAULT_UNBOUNDED_MAX_TOKENS: u64 = 200_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
