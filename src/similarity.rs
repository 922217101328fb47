//! Fingerprint comparison: Hamming distance, similarity, classification.
//!
//! Two entry points compute the same distance. [`hamming_distance`] is the
//! fast path for comparison-heavy inner loops and assumes both inputs are
//! already validated 16-hex-char fingerprints. [`hamming_distance_checked`]
//! is the boundary path: it validates first and surfaces a
//! [`FingerprintError`] on malformed input. Validation is a deterministic
//! precondition check, so a failure here means the caller broke the
//! fingerprint contract, not that anything should be retried.

use serde::{Deserialize, Serialize};

use crate::error::FingerprintError;
use crate::fingerprint::FINGERPRINT_HEX_LEN;

/// Coarse classification of a fingerprint pair by Hamming distance.
///
/// The boundaries are part of the public contract: 0 is exact, 1-3 near,
/// 4-10 similar, everything above is different.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Identical fingerprints.
    Exact,
    /// Near-duplicate: distance 1-3.
    Near,
    /// Topically similar: distance 4-10.
    Similar,
    /// Unrelated: distance 11 and above.
    Different,
}

/// Parse and validate a fingerprint string into its raw 64-bit value.
///
/// This is the validation primitive behind [`hamming_distance_checked`];
/// batch consumers use it to validate once and then run comparisons on raw
/// `u64`s.
pub fn parse_fingerprint(s: &str) -> Result<u64, FingerprintError> {
    if s.len() != FINGERPRINT_HEX_LEN {
        return Err(FingerprintError::InvalidLength { len: s.len() });
    }
    u64::from_str_radix(s, 16).map_err(|_| FingerprintError::InvalidHex {
        value: s.to_string(),
    })
}

/// Hamming distance between two validated fingerprints (fast path).
///
/// Both inputs must already be 16-hex-char fingerprints; this function is
/// meant for inner loops where validation has happened upstream. On
/// malformed input the result is unspecified (a malformed side is treated
/// as all-zero bits).
pub fn hamming_distance(a: &str, b: &str) -> u32 {
    let a = u64::from_str_radix(a, 16).unwrap_or(0);
    let b = u64::from_str_radix(b, 16).unwrap_or(0);
    hamming_distance_u64(a, b)
}

/// Hamming distance between two fingerprints, validating both first.
///
/// Returns [`FingerprintError`] if either input is not exactly 16
/// hexadecimal characters. Use this at system boundaries where input is
/// untrusted.
pub fn hamming_distance_checked(a: &str, b: &str) -> Result<u32, FingerprintError> {
    let a = parse_fingerprint(a)?;
    let b = parse_fingerprint(b)?;
    Ok(hamming_distance_u64(a, b))
}

/// Hamming distance between two raw 64-bit fingerprint values.
#[inline]
pub fn hamming_distance_u64(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Similarity score derived from a Hamming distance: `1 - distance/64`.
///
/// Monotonically decreasing in distance; 1.0 at distance 0, 0.0 at 64.
pub fn similarity_from_distance(distance: u32) -> f32 {
    1.0 - distance as f32 / 64.0
}

/// Classify a Hamming distance into a [`MatchKind`].
pub fn classify_match(distance: u32) -> MatchKind {
    match distance {
        0 => MatchKind::Exact,
        1..=3 => MatchKind::Near,
        4..=10 => MatchKind::Similar,
        _ => MatchKind::Different,
    }
}
