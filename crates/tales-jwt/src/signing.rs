//! HMAC primitive and signing-algorithm behavior.
//!
//! Grounded on `mikkyang-rust-jwt::algorithm::rust_crypto`'s `Hmac<D>`
//! wiring over the `hmac`/`sha2` crates, the idiomatic choice over a
//! hand-rolled RFC 2104 implementation. Constant-time comparison is
//! grounded on `wilsonzlin-aero`'s use of `subtle::ConstantTimeEq`.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use tales_claims::SigningAlgorithm;

use crate::error::{Error, Result};

/// Computes the MAC for `message` under `algorithm` and `key`.
///
/// `algorithm = SigningAlgorithm::None` always yields an empty signature.
/// When `enforce_min_key_len` is `true` (the default path used by
/// `TokenManager`), a key shorter than the algorithm's minimum length is a
/// `ConfigurationError` rather than a weak-but-working signature — the
/// check is opt-out, never silently skipped.
pub fn compute_mac(algorithm: SigningAlgorithm, key: &[u8], message: &[u8], enforce_min_key_len: bool) -> Result<Vec<u8>> {
    if !algorithm.is_signed() {
        return Ok(Vec::new());
    }
    if enforce_min_key_len && key.len() < algorithm.min_key_len() {
        return Err(Error::Configuration(format!(
            "{} requires a key of at least {} bytes, got {}",
            algorithm.mac_name(),
            algorithm.min_key_len(),
            key.len()
        )));
    }
    if key.is_empty() {
        return Err(Error::Configuration(format!("{} requires a non-empty secret", algorithm.mac_name())));
    }
    Ok(match algorithm {
        SigningAlgorithm::None => unreachable!("handled above"),
        SigningAlgorithm::Hs256 => run_hmac_sha256(key, message)?,
        SigningAlgorithm::Hs384 => run_hmac_sha384(key, message)?,
        SigningAlgorithm::Hs512 => run_hmac_sha512(key, message)?,
    })
}

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

fn run_hmac_sha256(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|err| Error::Configuration(format!("could not initialize HMAC: {err}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn run_hmac_sha384(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha384::new_from_slice(key).map_err(|err| Error::Configuration(format!("could not initialize HMAC: {err}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn run_hmac_sha512(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha512::new_from_slice(key).map_err(|err| Error::Configuration(format!("could not initialize HMAC: {err}")))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Compare two signatures in constant time with respect to their contents
/// (length is compared directly, which is not secret in this protocol —
/// both sides already know the expected signature length for the declared
/// algorithm).
pub fn signatures_match(expected: &[u8], actual: &[u8]) -> bool {
    if expected.len() != actual.len() {
        return false;
    }
    expected.ct_eq(actual).into()
}
