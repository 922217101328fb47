//! Near-duplicate detection and clustering engine.
//!
//! This crate turns free text into a 64-bit locality-sensitive fingerprint,
//! compares fingerprints bit-by-bit, and greedily partitions a batch of
//! fingerprinted documents into similarity groups.
//!
//! ## What we do
//!
//! - Deterministic, seedless 64-bit token hashing (FNV-1a)
//! - Bit-vote fingerprints with a canonical 16-hex-char encoding
//! - Hamming distance, similarity scoring, and match classification
//! - Greedy recency-ordered center-comparison clustering of a batch
//!
//! ## Pure function guarantee
//!
//! Every operation is synchronous, single-threaded, and free of shared
//! mutable state: no I/O, no clocks, no global caches. Same input, same
//! output, on any machine. Independent batches can therefore be clustered
//! in parallel by the caller without coordination.
//!
//! ## Invariants worth knowing
//!
//! - A fingerprint is exactly 16 lowercase hex characters; empty or
//!   unextractable text maps to the all-zero sentinel, by policy.
//! - Clustering partitions its input: every document ends up in exactly
//!   one cluster's member list.
//! - Clustering compares members to their cluster center only; it is not
//!   transitive closure, and that is part of the contract.
//! - Fingerprint computation and clustering are deliberately decoupled so
//!   callers can fingerprint once at ingestion and cluster many times.

mod cluster;
mod error;
mod fingerprint;
mod hash;
mod similarity;
mod token;

pub use crate::cluster::{build_clusters, Cluster, ClusterConfig, Document};
pub use crate::error::FingerprintError;
pub use crate::fingerprint::{
    compute_fingerprint, fingerprint_from_tokens, EMPTY_FINGERPRINT, FINGERPRINT_HEX_LEN,
};
pub use crate::hash::{hash_token, FNV_OFFSET_BASIS, FNV_PRIME};
pub use crate::similarity::{
    classify_match, hamming_distance, hamming_distance_checked, hamming_distance_u64,
    parse_fingerprint, similarity_from_distance, MatchKind,
};
pub use crate::token::{tokenize, TokenizeOptions};
