//! Generation configuration.

use crate::algorithm::SigningAlgorithm;

/// Declarative policy for `tales_jwt::TokenManager::generate`.
///
/// Fields default to the least active choice (no issuer, no generated
/// claims) except `signing_algorithm`, which defaults to HS256 — callers
/// wanting an unsigned token must opt into `SigningAlgorithm::None`
/// explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Placed into `iss` when present.
    pub issuer: Option<String>,
    /// When `true`, `jti` receives a fresh random 128-bit identifier
    /// rendered as a UUID string.
    pub generate_id: bool,
    /// When `true`, `iat` is set to the current Unix time in seconds.
    pub include_issued_time: bool,
    /// When present, `nbf` = now + delay.
    pub valid_delay_seconds: Option<u64>,
    /// When present, `exp` = now + delay + duration (delay defaults to zero
    /// for this computation only, independent of `valid_delay_seconds`).
    pub valid_duration_seconds: Option<u64>,
    /// The algorithm used to sign the token.
    pub signing_algorithm: SigningAlgorithm,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            issuer: None,
            generate_id: false,
            include_issued_time: false,
            valid_delay_seconds: None,
            valid_duration_seconds: None,
            signing_algorithm: SigningAlgorithm::default(),
        }
    }
}

impl GenerationConfig {
    /// Start from the defaults and sign with `algorithm`.
    pub fn with_algorithm(algorithm: SigningAlgorithm) -> Self {
        GenerationConfig { signing_algorithm: algorithm, ..Self::default() }
    }
}
