//! The immutable `Token` value type.
//!
//! Grounded on `toka-capability-core::Claims`, which derives
//! `Serialize`/`Deserialize`/`Clone`/`Debug`/`PartialEq` over a handful of
//! plain fields; `Token` follows the same derive set but keeps its fields
//! private behind read-only accessors instead, since headers and claims
//! must never become shared mutable state with callers — an invariant a
//! public struct field can't enforce on its own.

use indexmap::IndexMap;

use crate::value::ClaimValue;

/// A parsed or freshly generated JWT.
///
/// Constructed only by `tales_jwt::TokenManager::generate`/`parse`, which
/// live in a downstream crate — `Token::new` is `pub` rather than
/// `pub(crate)` for that reason, but it is not meant to be called directly
/// by application code; build a token through the manager instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    headers: IndexMap<String, ClaimValue>,
    claims: IndexMap<String, ClaimValue>,
    serialized: String,
    verified: bool,
}

impl Token {
    /// Construct a token from already-validated parts. Defensive copying of
    /// caller-owned maps is the responsibility of whoever builds the maps
    /// passed in here (`TokenManager::generate`/`parse` always build fresh
    /// owned maps, never borrow the caller's).
    pub fn new(
        headers: IndexMap<String, ClaimValue>,
        claims: IndexMap<String, ClaimValue>,
        serialized: String,
        verified: bool,
    ) -> Self {
        Token { headers, claims, serialized, verified }
    }

    /// The token's headers, in the order they were inserted or parsed.
    pub fn headers(&self) -> &IndexMap<String, ClaimValue> {
        &self.headers
    }

    /// The token's claims, in the order they were inserted or parsed.
    pub fn claims(&self) -> &IndexMap<String, ClaimValue> {
        &self.claims
    }

    /// Look up a single claim by name.
    pub fn claim(&self, name: &str) -> Option<&ClaimValue> {
        self.claims.get(name)
    }

    /// The exact compact wire string this token was generated as, or parsed
    /// from.
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    /// `true` for every freshly generated token. For a parsed token, `true`
    /// iff the signature was recomputed and matched, or the algorithm was
    /// `none` and the caller did not present a secret (see
    /// `tales_jwt::TokenManager::parse`).
    pub fn verified(&self) -> bool {
        self.verified
    }

    /// The `alg` header, if present and a string (it always is for tokens
    /// produced by this crate's own manager; a hand-built `Token` could
    /// omit it).
    pub fn algorithm_identifier(&self) -> Option<&str> {
        self.headers.get("alg").and_then(ClaimValue::as_str)
    }
}
