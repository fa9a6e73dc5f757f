//! Log sanitization utilities
//!
//! Response bodies can be large, and credentials must never be printed in full.

/// Maximum number of bytes of a body kept in log output and error messages.
const TRUNCATE_LIMIT: usize = 256;

/// Number of trailing characters of a secret left visible by [`mask_secret`].
const SECRET_VISIBLE_SUFFIX: usize = 4;

/// Truncate a response body for logging.
///
/// Cuts on a char boundary at or below [`TRUNCATE_LIMIT`] bytes and appends the
/// original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask a secret such as an API key, keeping only its last few characters.
///
/// Short secrets are masked completely.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= SECRET_VISIBLE_SUFFIX * 2 {
        return "****".to_string();
    }
    let suffix: String = secret.chars().skip(count - SECRET_VISIBLE_SUFFIX).collect();
    format!("****{suffix}")
}
