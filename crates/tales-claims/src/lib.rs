//! Claim value model, codec registry, `Token` and `GenerationConfig`.
//!
//! This crate is the leaf of the Tales workspace: it has no dependency on
//! the wire format (`tales-jwt`) or access control (`tales-capability`),
//! only on `serde`/`serde_json`/`indexmap`/`thiserror`, so both of those
//! crates can depend on it without a cycle. Structure and the
//! `#![forbid(unsafe_code)]` convention follow
//! `toka-capability-core`.

#![forbid(unsafe_code)]

//! # Overview
//!
//! - [`ClaimValue`] — the in-memory representation of a claim or header
//!   value.
//! - [`ClaimCodec`]/[`ClaimRegistry`] — the per-claim-name translation
//!   registry.
//! - [`Token`] — the immutable, parsed-or-generated token value.
//! - [`GenerationConfig`] — declarative generation policy.
//! - [`SigningAlgorithm`] — the algorithm tag shared with `tales-jwt`.

pub mod algorithm;
pub mod codec;
pub mod config;
pub mod error;
pub mod token;
pub mod uri;
pub mod value;

pub use algorithm::SigningAlgorithm;
pub use codec::{ClaimCodec, ClaimRegistry};
pub use config::GenerationConfig;
pub use error::{Error, Result};
pub use token::Token;
pub use value::{ClaimValue, CustomClaim};

/// Re-exports the types most call sites need.
pub mod prelude {
    pub use crate::algorithm::SigningAlgorithm;
    pub use crate::codec::{ClaimCodec, ClaimRegistry};
    pub use crate::config::GenerationConfig;
    pub use crate::error::{Error, Result};
    pub use crate::token::Token;
    pub use crate::uri::is_valid_string_or_uri;
    pub use crate::value::{ClaimValue, CustomClaim};
}
