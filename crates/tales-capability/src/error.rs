//! `tales-capability`'s slice of the surface-wide error taxonomy.

use thiserror::Error;

/// Errors raised while building capability families, bitsets, or
/// registering access-control declarations.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration-time mistake: duplicate capability name within a
    /// family, a claim name registered to more than one family, or a
    /// declaration naming a claim with no registered family.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A bitset (built directly, not through a codec) referenced a
    /// capability name absent from its family.
    #[error("unknown capability `{0}`")]
    UnknownCapability(String),

    /// A claim-level error surfaced from the registry in `tales-claims`
    /// (most commonly `UnknownCapability` raised while decoding a bitset
    /// claim during token parsing).
    #[error(transparent)]
    Claim(#[from] tales_claims::Error),
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, Error>;
