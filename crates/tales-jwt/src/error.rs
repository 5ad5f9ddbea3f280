//! `tales-jwt`'s slice of the surface-wide error taxonomy.

use thiserror::Error;

/// Errors raised by base64url decoding, the signing-algorithm registry and
/// `TokenManager::generate`/`parse`.
#[derive(Debug, Error)]
pub enum Error {
    /// Structural defect: wrong segment count, bad base64, bad JSON, or an
    /// unknown JSON shape in a claim with no registered codec.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The `alg` header (or a requested algorithm) is not one this registry
    /// knows about.
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signing was requested without a secret, or with a secret shorter
    /// than the algorithm's minimum key length.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A claim-level error surfaced from the registry in `tales-claims`.
    #[error(transparent)]
    Claim(#[from] tales_claims::Error),
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, Error>;
