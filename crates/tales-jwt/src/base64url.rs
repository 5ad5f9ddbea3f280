//! Unpadded base64url codec.
//!
//! Grounded on `wilsonzlin-aero::crates-aero-auth-tokens`'s strict
//! `is_base64url` validator (reject anything outside the alphabet,
//! including padding) layered on top of the `base64` crate's
//! `URL_SAFE_NO_PAD` engine rather than a hand-rolled codec, following
//! `mikkyang-rust-jwt`'s `ToBase64`/`FromBase64` traits (which also wrap
//! `base64::encode_config`/`decode_config`).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::{Error, Result};

/// Encode `bytes` as unpadded, URL-safe base64 (RFC 4648 §5).
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode an unpadded, URL-safe base64 string.
///
/// Rejects any character outside the URL-safe alphabet, including `=`
/// padding, rather than silently tolerating it the way some base64 engines
/// allow.
pub fn decode(segment: &str) -> Result<Vec<u8>> {
    if !segment.bytes().all(is_url_safe_alphabet_byte) {
        return Err(Error::MalformedToken(format!("segment `{segment}` contains non-base64url characters")));
    }
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| Error::MalformedToken(format!("invalid base64url segment: {err}")))
}

fn is_url_safe_alphabet_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let original = b"\x00\x01hello world\xff";
        let encoded = encode(original);
        assert!(!encoded.contains('='));
        assert_eq!(decode(&encoded).unwrap(), original);
    }

    #[test]
    fn rejects_padding() {
        assert!(decode("YWJj=").is_err());
    }

    #[test]
    fn rejects_non_alphabet_characters() {
        assert!(decode("not base64!").is_err());
        assert!(decode("has/slash").is_err());
        assert!(decode("has+plus").is_err());
    }

    #[test]
    fn accepts_missing_padding() {
        // "f" encodes to one base64 character plus padding in the padded
        // alphabet; the unpadded form must still decode cleanly.
        let encoded = encode(b"f");
        assert_eq!(decode(&encoded).unwrap(), b"f");
    }
}
