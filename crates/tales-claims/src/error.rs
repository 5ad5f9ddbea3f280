//! Error taxonomy shared by every crate that builds on the claim model.
//!
//! Each variant below corresponds to one kind from the stable, surface-wide
//! error taxonomy: `ConfigurationError`, `ClaimEncodingError`/
//! `ClaimDecodingError`, and `InvalidClaimValueError`. The wire-format and
//! access-control crates (`tales-jwt`, `tales-capability`) define their own
//! `Error` enums and wrap this one via `#[from]` rather than flattening
//! everything into a single workspace-wide type, keeping each crate's
//! `Error` scoped to its own concerns.

use thiserror::Error;

/// Errors produced while registering codecs or translating claim values.
#[derive(Debug, Error)]
pub enum Error {
    /// A codec was already registered for this claim name.
    #[error("a codec is already registered for claim `{0}`")]
    DuplicateRegistration(String),

    /// A registered codec failed to render a value to JSON.
    #[error("failed to encode claim `{claim}`: {reason}")]
    ClaimEncoding {
        /// The offending claim name.
        claim: String,
        /// Human-readable cause.
        reason: String,
    },

    /// A registered codec failed to parse a JSON element back into a value.
    #[error("failed to decode claim `{claim}`: {reason}")]
    ClaimDecoding {
        /// The offending claim name.
        claim: String,
        /// Human-readable cause.
        reason: String,
    },

    /// A string claim violated the StringOrURI rule, or a null string claim
    /// was supplied where absence was required instead.
    #[error("invalid value for claim `{claim}`: {reason}")]
    InvalidClaimValue {
        /// The offending claim name.
        claim: String,
        /// Human-readable cause.
        reason: String,
    },

    /// A claim value has a runtime shape with neither a registered codec
    /// nor a primitive fallback (i.e. it is not string/number/bool).
    #[error("claim `{0}` has an unsupported value shape and no registered codec")]
    UnsupportedClaimValue(String),

    /// A capability-bitset codec decoded a capability name absent from its
    /// family. Lives here, rather than only in `tales-capability`, because
    /// it surfaces through [`crate::codec::ClaimCodec::decode`], whose
    /// error type is fixed to this enum.
    #[error("unknown capability `{0}`")]
    UnknownCapability(String),
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, Error>;
