//! The signing-algorithm tag, shared across the claim and wire-format crates.
//!
//! `SigningAlgorithm` is shared by `tales-claims` (it's a field of
//! [`crate::config::GenerationConfig`]) and `tales-jwt` (which owns the
//! actual HMAC computation and the wire-string lookup). Splitting the enum
//! out here keeps the dependency graph a DAG: `GenerationConfig` needs to
//! name an algorithm without `tales-claims` depending on `tales-jwt`.

use serde::{Deserialize, Serialize};

/// One of the four algorithm identifiers the wire format recognizes.
///
/// Case-sensitive wire identifiers: `HS256`, `HS384`, `HS512`, `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SigningAlgorithm {
    /// Unsigned. Produces an empty signature segment.
    None,
    Hs256,
    Hs384,
    Hs512,
}

impl Default for SigningAlgorithm {
    fn default() -> Self {
        SigningAlgorithm::Hs256
    }
}

impl SigningAlgorithm {
    /// The exact string written into the `alg` header and expected back on
    /// parse.
    pub fn wire_identifier(self) -> &'static str {
        match self {
            SigningAlgorithm::None => "none",
            SigningAlgorithm::Hs256 => "HS256",
            SigningAlgorithm::Hs384 => "HS384",
            SigningAlgorithm::Hs512 => "HS512",
        }
    }

    /// Resolve a wire identifier to a variant. Returns `None` for anything
    /// not in `{HS256, HS384, HS512, none}` — callers turn that into
    /// `UnsupportedAlgorithmError`.
    pub fn from_wire_identifier(identifier: &str) -> Option<Self> {
        match identifier {
            "none" => Some(SigningAlgorithm::None),
            "HS256" => Some(SigningAlgorithm::Hs256),
            "HS384" => Some(SigningAlgorithm::Hs384),
            "HS512" => Some(SigningAlgorithm::Hs512),
            _ => None,
        }
    }

    /// Minimum secret-key length this algorithm requires before `tales-jwt`
    /// will use it by default: 32/48/64 bytes for HS256/384/512; zero for
    /// `none`, which takes no key at all.
    pub fn min_key_len(self) -> usize {
        match self {
            SigningAlgorithm::None => 0,
            SigningAlgorithm::Hs256 => 32,
            SigningAlgorithm::Hs384 => 48,
            SigningAlgorithm::Hs512 => 64,
        }
    }

    /// Human-readable MAC primitive name, surfaced in logs and error
    /// messages.
    pub fn mac_name(self) -> &'static str {
        match self {
            SigningAlgorithm::None => "none",
            SigningAlgorithm::Hs256 => "HMAC-SHA256",
            SigningAlgorithm::Hs384 => "HMAC-SHA384",
            SigningAlgorithm::Hs512 => "HMAC-SHA512",
        }
    }

    /// Whether this algorithm signs at all.
    pub fn is_signed(self) -> bool {
        !matches!(self, SigningAlgorithm::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_identifiers_round_trip() {
        for algo in [
            SigningAlgorithm::None,
            SigningAlgorithm::Hs256,
            SigningAlgorithm::Hs384,
            SigningAlgorithm::Hs512,
        ] {
            let id = algo.wire_identifier();
            assert_eq!(SigningAlgorithm::from_wire_identifier(id), Some(algo));
        }
    }

    #[test]
    fn unknown_identifier_is_none() {
        assert_eq!(SigningAlgorithm::from_wire_identifier("RS256"), None);
    }

    #[test]
    fn default_is_hs256() {
        assert_eq!(SigningAlgorithm::default(), SigningAlgorithm::Hs256);
    }
}
