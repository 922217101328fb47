use thiserror::Error;

/// Errors produced by the fingerprint comparison and clustering layer.
///
/// Both variants are deterministic precondition violations at the caller
/// boundary, never transient conditions; there is no retry path anywhere in
/// this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    /// Fingerprint string is not exactly 16 characters long.
    #[error("fingerprint must be exactly 16 hex characters, got {len}")]
    InvalidLength { len: usize },
    /// Fingerprint string has the right length but is not hexadecimal.
    #[error("fingerprint is not valid hexadecimal: {value:?}")]
    InvalidHex { value: String },
    /// Invalid clustering configuration.
    #[error("invalid cluster config: {0}")]
    InvalidConfig(String),
}
