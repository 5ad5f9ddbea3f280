//! Capability families, bitsets, access-control declarations and the
//! authorization evaluator.

#![forbid(unsafe_code)]

pub mod bitset;
pub mod codec;
pub mod declaration;
pub mod error;
pub mod evaluator;
pub mod family;
pub mod registry;

pub use bitset::CapabilitySet;
pub use codec::BitsetCodec;
pub use declaration::AccessControlDeclaration;
pub use error::{Error, Result};
pub use evaluator::{authorize, AuthorizeOptions, Decision, DenyReason};
pub use family::{CapabilityFamily, CapabilityFamilyBuilder};
pub use registry::AuthorizationRegistry;

/// Re-exports the types most call sites need.
pub mod prelude {
    pub use crate::bitset::CapabilitySet;
    pub use crate::declaration::AccessControlDeclaration;
    pub use crate::error::{Error, Result};
    pub use crate::evaluator::{authorize, AuthorizeOptions, Decision, DenyReason};
    pub use crate::family::{CapabilityFamily, CapabilityFamilyBuilder};
    pub use crate::registry::AuthorizationRegistry;
}
