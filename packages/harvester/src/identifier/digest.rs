//! Truncated content digests for fallback identifiers.
//!
//! MD5, lowercase hex. Ids derived from it are persisted as file names, so
//! the algorithm and truncation lengths must never change.

/// Hex digits used by code and constitutional amendment fallbacks.
pub const SHORT_DIGEST_LEN: usize = 6;

/// Hex digits used by the generic `law-` fallback.
pub const LAW_DIGEST_LEN: usize = 8;

/// MD5 of `input` as lowercase hex, truncated to `len` digits.
#[must_use]
pub fn hex_digest(input: &str, len: usize) -> String {
    let mut hex = format!("{:x}", md5::compute(input.as_bytes()));
    hex.truncate(len);
    hex
}
