//! Utility modules.

/// Helpers that keep response bodies and secrets out of logs.
pub mod log_sanitizer;
