//! Greedy near-duplicate clustering over fingerprinted documents.
//!
//! The builder partitions a batch of documents into similarity groups by a
//! single greedy pass over a recency-sorted order: the most recent
//! unassigned document seeds a cluster as its **center**, and every later
//! unassigned document within `max_distance` of that center joins it.
//!
//! ## Contract
//!
//! - Every input document lands in exactly one cluster (partition
//!   property).
//! - Only center-to-member distances are checked. Two non-center members
//!   of one cluster may be farther apart than the threshold; this
//!   center-comparison semantics is intentional and must not be upgraded
//!   to connected-component clustering without changing the contract.
//! - Clusters are transient: each call recomputes the partition from
//!   scratch and cluster ids carry no identity across calls.
//! - Documents with equal timestamps keep their original input order in
//!   the recency sort, so the partition is deterministic for a given
//!   batch.
//!
//! Complexity is O(n²) fingerprint comparisons in the worst case. Callers
//! with large batches should pre-partition by time window or source before
//! invoking the builder; independent batches can safely run in parallel.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FingerprintError;
use crate::similarity::{hamming_distance_u64, parse_fingerprint};

/// A fingerprinted document supplied to the cluster builder.
///
/// The fingerprint is precomputed by the caller (see
/// [`compute_fingerprint`](crate::compute_fingerprint)); the builder never
/// re-derives it from text, so callers are free to cache fingerprints at
/// ingestion time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Opaque document identifier.
    pub id: String,
    /// 16-hex-char fingerprint of the document's content.
    pub fingerprint: String,
    /// Publication timestamp; clustering prefers recent documents as
    /// cluster centers.
    pub published_at: DateTime<Utc>,
    /// Identifier of the originating source.
    pub source_id: String,
}

/// One similarity group in the partition returned by [`build_clusters`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cluster {
    /// Cluster identifier, `"cluster-{n}"` in creation order. Valid only
    /// within the batch that produced it.
    pub id: String,
    /// Id of the center document the members were compared against.
    pub center_id: String,
    /// Member document ids, center first, then joiners in recency order.
    pub member_ids: Vec<String>,
    /// Mean Hamming distance of non-center members to the center; 0.0 for
    /// a singleton cluster.
    pub average_distance: f32,
}

/// Configuration for the cluster builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Maximum Hamming distance at which a document joins a cluster.
    pub max_distance: u32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self { max_distance: 3 }
    }
}

impl ClusterConfig {
    /// Create a configuration with the default near-duplicate threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum joining distance. 0 clusters exact duplicates only.
    pub fn with_max_distance(mut self, max_distance: u32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Validate the configuration. Distances above 64 are unreachable for
    /// 64-bit fingerprints and indicate a caller bug.
    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.max_distance > 64 {
            return Err(FingerprintError::InvalidConfig(format!(
                "max_distance must be at most 64, got {}",
                self.max_distance
            )));
        }
        Ok(())
    }
}

/// Partition `documents` into near-duplicate clusters.
///
/// Every fingerprint is validated up front; a malformed one fails the whole
/// call with a [`FingerprintError`], since it indicates a broken contract
/// at the boundary rather than a condition to skip past. An empty batch
/// returns an empty partition, not an error.
///
/// # Examples
///
/// ```rust
/// use chrono::Utc;
/// use neardup::{build_clusters, ClusterConfig, Document};
///
/// let now = Utc::now();
/// let docs = vec![
///     Document {
///         id: "a1".into(),
///         fingerprint: "ffffffffffffffff".into(),
///         published_at: now,
///         source_id: "wire".into(),
///     },
///     Document {
///         id: "a2".into(),
///         fingerprint: "efffffffffffffff".into(),
///         published_at: now,
///         source_id: "blog".into(),
///     },
/// ];
///
/// let clusters = build_clusters(&docs, &ClusterConfig::default()).unwrap();
/// assert_eq!(clusters.len(), 1);
/// assert_eq!(clusters[0].member_ids, vec!["a1", "a2"]);
/// ```
pub fn build_clusters(
    documents: &[Document],
    cfg: &ClusterConfig,
) -> Result<Vec<Cluster>, FingerprintError> {
    let start = Instant::now();

    cfg.validate()?;

    // Boundary sanity check: validate and parse every fingerprint once,
    // then run the comparison loops on raw u64s.
    let bits: Vec<u64> = documents
        .iter()
        .map(|doc| parse_fingerprint(&doc.fingerprint))
        .collect::<Result<_, _>>()?;

    // Recency order, most recent first. The sort is stable, so documents
    // with equal timestamps keep their original input order.
    let mut order: Vec<usize> = (0..documents.len()).collect();
    order.sort_by(|&a, &b| documents[b].published_at.cmp(&documents[a].published_at));

    let mut assigned = vec![false; documents.len()];
    let mut clusters = Vec::new();

    for (pos, &center) in order.iter().enumerate() {
        if assigned[center] {
            continue;
        }
        assigned[center] = true;

        let mut member_ids = vec![documents[center].id.clone()];
        let mut distance_sum = 0u32;

        for &candidate in &order[pos + 1..] {
            if assigned[candidate] {
                continue;
            }
            let distance = hamming_distance_u64(bits[center], bits[candidate]);
            if distance <= cfg.max_distance {
                assigned[candidate] = true;
                member_ids.push(documents[candidate].id.clone());
                distance_sum += distance;
            }
        }

        let joiners = member_ids.len() - 1;
        let average_distance = if joiners == 0 {
            0.0
        } else {
            distance_sum as f32 / joiners as f32
        };

        clusters.push(Cluster {
            id: format!("cluster-{}", clusters.len()),
            center_id: documents[center].id.clone(),
            member_ids,
            average_distance,
        });
    }

    debug!(
        documents = documents.len(),
        clusters = clusters.len(),
        max_distance = cfg.max_distance,
        elapsed_micros = start.elapsed().as_micros() as u64,
        "clusters_built"
    );

    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doc(id: &str, fingerprint: &str, ts_secs: i64) -> Document {
        Document {
            id: id.to_string(),
            fingerprint: fingerprint.to_string(),
            published_at: Utc.timestamp_opt(ts_secs, 0).unwrap(),
            source_id: "test-source".to_string(),
        }
    }

    #[test]
    fn empty_batch_yields_empty_partition() {
        let clusters = build_clusters(&[], &ClusterConfig::default()).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn one_bit_apart_documents_share_a_cluster() {
        let docs = vec![
            doc("a", "ffffffffffffffff", 100),
            doc("b", "efffffffffffffff", 90),
        ];
        let clusters = build_clusters(&docs, &ClusterConfig::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].center_id, "a");
        assert_eq!(clusters[0].member_ids, vec!["a", "b"]);
        assert_eq!(clusters[0].average_distance, 1.0);
    }

    #[test]
    fn maximally_distant_documents_stay_singletons() {
        let docs = vec![
            doc("a", "ffffffffffffffff", 100),
            doc("b", "0000000000000000", 90),
        ];
        let clusters = build_clusters(&docs, &ClusterConfig::default()).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].member_ids, vec!["a"]);
        assert_eq!(clusters[0].average_distance, 0.0);
        assert_eq!(clusters[1].member_ids, vec!["b"]);
    }

    #[test]
    fn recency_picks_the_center() {
        let docs = vec![
            doc("older", "ffffffffffffffff", 50),
            doc("newest", "fffffffffffffffe", 200),
            doc("middle", "fffffffffffffffc", 100),
        ];
        let clusters = build_clusters(&docs, &ClusterConfig::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].center_id, "newest");
        assert_eq!(clusters[0].member_ids, vec!["newest", "middle", "older"]);
    }

    #[test]
    fn mixed_batch_matches_reference_scenario() {
        let docs = vec![
            doc("a1", "ffffffffffffffff", 300),
            doc("a2", "efffffffffffffff", 200),
            doc("a3", "0000000000000000", 100),
        ];
        let clusters = build_clusters(&docs, &ClusterConfig::default()).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].center_id, "a1");
        assert_eq!(clusters[0].member_ids, vec!["a1", "a2"]);
        assert_eq!(clusters[0].average_distance, 1.0);
        assert_eq!(clusters[1].center_id, "a3");
        assert_eq!(clusters[1].member_ids, vec!["a3"]);
    }

    #[test]
    fn equal_timestamps_preserve_input_order() {
        let docs = vec![
            doc("first", "ffffffffffffffff", 100),
            doc("second", "ffffffffffffffff", 100),
            doc("third", "ffffffffffffffff", 100),
        ];
        let clusters = build_clusters(&docs, &ClusterConfig::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].center_id, "first");
        assert_eq!(clusters[0].member_ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn partition_covers_every_document_exactly_once() {
        let docs = vec![
            doc("a", "ffffffffffffffff", 500),
            doc("b", "efffffffffffffff", 400),
            doc("c", "00000000000000ff", 300),
            doc("d", "00000000000000fe", 200),
            doc("e", "0f0f0f0f0f0f0f0f", 100),
        ];
        let clusters = build_clusters(&docs, &ClusterConfig::default()).unwrap();

        let mut seen: Vec<&str> = clusters
            .iter()
            .flat_map(|c| c.member_ids.iter().map(String::as_str))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn center_comparison_is_not_transitive() {
        // b and c are each within 3 of center a, but 4 bits from each
        // other; they still share a's cluster.
        let docs = vec![
            doc("a", "0000000000000003", 300),
            doc("b", "0000000000000000", 200),
            doc("c", "000000000000000f", 100),
        ];
        let clusters = build_clusters(&docs, &ClusterConfig::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].member_ids, vec!["a", "b", "c"]);
        assert!(
            hamming_distance_u64(0x0, 0xf) > 3,
            "members must exceed the threshold pairwise for this test"
        );
    }

    #[test]
    fn threshold_zero_groups_exact_duplicates_only() {
        let docs = vec![
            doc("a", "cafebabecafebabe", 300),
            doc("b", "cafebabecafebabe", 200),
            doc("c", "cafebabecafebabf", 100),
        ];
        let cfg = ClusterConfig::default().with_max_distance(0);
        let clusters = build_clusters(&docs, &cfg).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].member_ids, vec!["a", "b"]);
        assert_eq!(clusters[1].member_ids, vec!["c"]);
    }

    #[test]
    fn average_distance_is_mean_of_member_distances() {
        let docs = vec![
            doc("center", "0000000000000000", 300),
            doc("one_bit", "0000000000000001", 200),
            doc("three_bits", "0000000000000007", 100),
        ];
        let clusters = build_clusters(&docs, &ClusterConfig::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].average_distance, 2.0);
    }

    #[test]
    fn malformed_fingerprint_fails_the_call() {
        let docs = vec![
            doc("ok", "0000000000000000", 200),
            doc("bad", "123", 100),
        ];
        let err = build_clusters(&docs, &ClusterConfig::default()).unwrap_err();
        assert_eq!(err, FingerprintError::InvalidLength { len: 3 });
    }

    #[test]
    fn config_rejects_unreachable_threshold() {
        assert!(ClusterConfig::default().validate().is_ok());
        assert!(ClusterConfig::default()
            .with_max_distance(65)
            .validate()
            .is_err());
    }

    #[test]
    fn cluster_ids_are_sequential_in_creation_order() {
        let docs = vec![
            doc("a", "ffffffffffffffff", 300),
            doc("b", "0000000000000000", 200),
        ];
        let clusters = build_clusters(&docs, &ClusterConfig::default()).unwrap();
        assert_eq!(clusters[0].id, "cluster-0");
        assert_eq!(clusters[1].id, "cluster-1");
    }

    #[test]
    fn document_serde_roundtrip() {
        let document = doc("a1", "0123456789abcdef", 1_700_000_000);
        let json = serde_json::to_string(&document).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(document, back);
    }
}
