//! Token hashing for fingerprint construction.
//!
//! This module provides the single 64-bit hash primitive the fingerprint
//! layer is built on. It is deliberately seedless: the same token must hash
//! to the same value across process restarts and platforms, because
//! fingerprints are computed once at ingestion time and compared forever
//! after.
//!
//! # Algorithm
//!
//! FNV-1a over the token's characters, processed as their Unicode code
//! points:
//!
//! ```text
//! h = OFFSET_BASIS
//! for each char c:
//!     h = (h XOR code_point(c)) * PRIME   (wrapping 64-bit multiply)
//! ```
//!
//! The empty string hashes to the offset basis itself.

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Compute the deterministic 64-bit FNV-1a hash of a token.
///
/// Characters are folded in as their numeric code points, so the hash is
/// independent of the platform's byte representation of the string.
///
/// # Examples
///
/// ```rust
/// use neardup::{hash_token, FNV_OFFSET_BASIS};
///
/// // Deterministic
/// assert_eq!(hash_token("breaking"), hash_token("breaking"));
///
/// // The empty string is the offset basis
/// assert_eq!(hash_token(""), FNV_OFFSET_BASIS);
/// ```
pub fn hash_token(token: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for ch in token.chars() {
        hash ^= ch as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
