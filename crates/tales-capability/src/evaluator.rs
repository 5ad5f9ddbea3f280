//! The access-control evaluator (decision half).

use tales_claims::Token;
use tracing::debug;

use crate::bitset::CapabilitySet;
use crate::declaration::AccessControlDeclaration;

/// The outcome of evaluating a token against a set of declarations.
///
/// Deliberately not an `Error` — authorization outcomes are observable
/// state, not exceptions; the HTTP layer maps `Denied` to 401/403 itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Every declaration was satisfied.
    Granted,
    /// At least one declaration failed, for the given reason.
    Denied(DenyReason),
}

impl Decision {
    /// `true` for `Granted`.
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }
}

/// Why a [`Decision::Denied`] was reached. Variant names match the literal
/// reason strings rendered in [`std::fmt::Display`] (`"expired"`,
/// `"not_yet_valid"`, `"missing_claim"`, `"family_mismatch"`,
/// `"insufficient_capabilities"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The token's `verified` flag was `false`, or it used `alg=none`
    /// without the caller opting in via [`AuthorizeOptions::allow_none_algorithm`].
    Unverified,
    /// Current time is at or past the token's `exp` claim.
    Expired,
    /// Current time is before the token's `nbf` claim.
    NotYetValid,
    /// A declaration named a claim absent from the token.
    MissingClaim(String),
    /// The claim's value was not a capability set from the declaration's
    /// family.
    FamilyMismatch(String),
    /// The claim's capability set was missing one or more required
    /// capabilities.
    InsufficientCapabilities {
        /// The claim that was checked.
        claim: String,
        /// Required capability names absent from the token's set, in
        /// family order.
        missing: Vec<String>,
    },
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenyReason::Unverified => write!(f, "unverified"),
            DenyReason::Expired => write!(f, "expired"),
            DenyReason::NotYetValid => write!(f, "not_yet_valid"),
            DenyReason::MissingClaim(claim) => write!(f, "missing_claim: {claim}"),
            DenyReason::FamilyMismatch(claim) => write!(f, "family_mismatch: {claim}"),
            DenyReason::InsufficientCapabilities { claim, missing } => {
                write!(f, "insufficient_capabilities: {claim} missing {missing:?}")
            }
        }
    }
}

/// Options for [`authorize`] not carried by the token or declarations
/// themselves.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizeOptions {
    /// The current time, as Unix seconds. Callers supply this explicitly —
    /// the evaluator performs no I/O and reads no clock.
    pub now: u64,
    /// Whether an `alg=none` token should be treated as eligible for
    /// authorization at all. Defaults to `false`: an unsigned token is
    /// never implicitly trusted.
    pub allow_none_algorithm: bool,
}

impl AuthorizeOptions {
    /// Options for time `now`, with `allow_none_algorithm` left at its
    /// secure default (`false`).
    pub fn at(now: u64) -> Self {
        AuthorizeOptions { now, allow_none_algorithm: false }
    }
}

/// Evaluate `token` against `declarations`, short-circuiting on the first
/// failing declaration.
pub fn authorize(token: &Token, declarations: &[AccessControlDeclaration], options: &AuthorizeOptions) -> Decision {
    if !token.verified() {
        debug!(decision = "denied", reason = "unverified", "authorization check");
        return Decision::Denied(DenyReason::Unverified);
    }
    if !options.allow_none_algorithm && token.algorithm_identifier() == Some("none") {
        debug!(decision = "denied", reason = "unverified", "alg=none token rejected by default");
        return Decision::Denied(DenyReason::Unverified);
    }

    if let Some(exp) = numeric_claim(token, "exp") {
        if options.now >= exp {
            debug!(decision = "denied", reason = "expired", "authorization check");
            return Decision::Denied(DenyReason::Expired);
        }
    }
    if let Some(nbf) = numeric_claim(token, "nbf") {
        if options.now < nbf {
            debug!(decision = "denied", reason = "not_yet_valid", "authorization check");
            return Decision::Denied(DenyReason::NotYetValid);
        }
    }

    for declaration in declarations {
        let Some(value) = token.claim(declaration.claim_name()) else {
            debug!(decision = "denied", reason = "missing_claim", claim = declaration.claim_name(), "authorization check");
            return Decision::Denied(DenyReason::MissingClaim(declaration.claim_name().to_string()));
        };

        let Some(actual) = value.downcast_custom::<CapabilitySet>() else {
            debug!(decision = "denied", reason = "family_mismatch", claim = declaration.claim_name(), "authorization check");
            return Decision::Denied(DenyReason::FamilyMismatch(declaration.claim_name().to_string()));
        };

        if !std::sync::Arc::ptr_eq(actual.family(), declaration.required().family()) {
            debug!(decision = "denied", reason = "family_mismatch", claim = declaration.claim_name(), "authorization check");
            return Decision::Denied(DenyReason::FamilyMismatch(declaration.claim_name().to_string()));
        }

        if !actual.contains_all(declaration.required()) {
            let missing = actual.names_missing_for(declaration.required());
            debug!(
                decision = "denied",
                reason = "insufficient_capabilities",
                claim = declaration.claim_name(),
                ?missing,
                "authorization check"
            );
            return Decision::Denied(DenyReason::InsufficientCapabilities {
                claim: declaration.claim_name().to_string(),
                missing,
            });
        }
    }

    debug!(decision = "granted", "authorization check");
    Decision::Granted
}

fn numeric_claim(token: &Token, name: &str) -> Option<u64> {
    token.claim(name).and_then(|value| match value {
        tales_claims::ClaimValue::Number(n) => n.as_u64(),
        _ => None,
    })
}
