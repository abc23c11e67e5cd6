//! System-wide default constants.
//!
//! Centralises the tunables that were previously embedded at call sites.

// ============================================================================
// Windowing
// ============================================================================

/// Duration of one analysis window (seconds).
///
/// Each window of raw samples becomes one pattern-analysis request.
pub const WINDOW_INTERVAL_SECS: f64 = 3.0;

// ============================================================================
// Playback
// ============================================================================

/// Period of the live-replay tick (milliseconds).
///
/// One sample is published per tick; 100 ms gives a 10 Hz live feed.
pub const PLAYBACK_TICK_MS: u64 = 100;

// ============================================================================
// HTTP
// ============================================================================

/// Per-request timeout for both the file store and the analysis service
/// (seconds). The original relied on transport defaults; made explicit.
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Default analysis-service chat endpoint.
pub const ANALYSIS_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default analysis model name.
pub const ANALYSIS_MODEL: &str = "gpt-4o-mini";

// ============================================================================
// Environment variables for injected secrets
// ============================================================================

/// Env var carrying the file-store bearer token.
pub const STORE_TOKEN_ENV: &str = "NEUROPULSE_STORE_TOKEN";

/// Env var carrying the analysis-service bearer token.
pub const ANALYSIS_TOKEN_ENV: &str = "NEUROPULSE_ANALYSIS_TOKEN";
