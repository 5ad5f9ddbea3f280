//! Signing-algorithm registry lookup.
//!
//! The lookup itself is a pure function over [`SigningAlgorithm`]'s own
//! wire-identifier table (`tales_claims::algorithm`); this module exists so
//! `UnsupportedAlgorithmError` is raised at one clearly named call site,
//! mirroring `toka-kernel::registry`'s pattern of a single lookup function
//! other components call into rather than inlining `match` arms at every
//! use site.

use tales_claims::SigningAlgorithm;

use crate::error::{Error, Result};

/// Resolve a wire identifier (as read from a token's `alg` header) to a
/// [`SigningAlgorithm`]. Unknown identifiers are `UnsupportedAlgorithmError`.
pub fn resolve_algorithm(wire_identifier: &str) -> Result<SigningAlgorithm> {
    SigningAlgorithm::from_wire_identifier(wire_identifier)
        .ok_or_else(|| Error::UnsupportedAlgorithm(wire_identifier.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_identifiers_resolve() {
        assert_eq!(resolve_algorithm("HS256").unwrap(), SigningAlgorithm::Hs256);
        assert_eq!(resolve_algorithm("none").unwrap(), SigningAlgorithm::None);
    }

    #[test]
    fn unknown_identifier_is_unsupported_algorithm_error() {
        let err = resolve_algorithm("RS256").unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm(id) if id == "RS256"));
    }
}
