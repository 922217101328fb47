//! Locality-sensitive 64-bit fingerprints over word tokens.
//!
//! This module builds the bit-vote fingerprint the rest of the engine
//! compares and clusters on. The construction is the classic per-bit voting
//! scheme: every token casts a +1/-1 vote on each of 64 bit positions based
//! on its own 64-bit hash, and the final bit is 1 only where the vote sum is
//! strictly positive. Similar token streams therefore produce fingerprints
//! at small Hamming distance.
//!
//! ## Contract
//!
//! - Pure function of the input text; no I/O, no clocks, no global state.
//! - Empty or unextractable text maps to the all-zero sentinel
//!   [`EMPTY_FINGERPRINT`]. That is a policy, not an error: downstream
//!   pipelines group "no content" deterministically instead of branching on
//!   a special case.
//! - Ties in the vote sum collapse to 0, never 1. This asymmetry is part of
//!   the fingerprint contract; changing it silently changes fingerprints of
//!   short or ambiguous texts.
//!
//! Fingerprints are computed once at ingestion and are immutable afterward;
//! clustering never re-derives them from text.

use crate::hash::hash_token;
use crate::token::{tokenize, TokenizeOptions};

/// Length of the canonical hex encoding of a fingerprint.
pub const FINGERPRINT_HEX_LEN: usize = 16;

/// Sentinel fingerprint for empty or unextractable text.
pub const EMPTY_FINGERPRINT: &str = "0000000000000000";

/// Compute the 16-character lowercase hex fingerprint of `text`.
///
/// Tokenization uses the engine's fingerprint contract: lowercase word
/// tokens of at least two characters, no stopword filtering.
///
/// # Examples
///
/// ```rust
/// use neardup::{compute_fingerprint, EMPTY_FINGERPRINT};
///
/// let fp = compute_fingerprint("markets rally on earnings news");
/// assert_eq!(fp.len(), 16);
///
/// // Same text, same fingerprint, always.
/// assert_eq!(fp, compute_fingerprint("markets rally on earnings news"));
///
/// // Empty input is the sentinel, not an error.
/// assert_eq!(compute_fingerprint(""), EMPTY_FINGERPRINT);
/// ```
pub fn compute_fingerprint(text: &str) -> String {
    let opts = TokenizeOptions::default();
    let tokens = tokenize(text, &opts);
    fingerprint_from_tokens(&tokens)
}

/// Compute a fingerprint directly from an ordered token stream.
///
/// Callers that already hold tokens (for example because they share a token
/// stream with keyword extraction) can skip re-tokenization; the result is
/// identical to [`compute_fingerprint`] on the equivalent text.
pub fn fingerprint_from_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    if tokens.is_empty() {
        return EMPTY_FINGERPRINT.to_string();
    }

    // Call-local vote accumulator; one slot per output bit.
    let mut votes = [0i32; 64];
    for token in tokens {
        let hash = hash_token(token.as_ref());
        for (bit, vote) in votes.iter_mut().enumerate() {
            if (hash >> bit) & 1 == 1 {
                *vote += 1;
            } else {
                *vote -= 1;
            }
        }
    }

    // Collapse: strictly positive votes set the bit; ties fall to 0.
    let mut bits = 0u64;
    for (bit, &vote) in votes.iter().enumerate() {
        if vote > 0 {
            bits |= 1u64 << bit;
        }
    }

    format!("{bits:016x}")
}
