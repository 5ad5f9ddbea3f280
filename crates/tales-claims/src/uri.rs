//! StringOrURI validation.
//!
//! JWT's `StringOrURI` rule: a string claim containing a `:` must parse as
//! an absolute URI; strings without `:` are arbitrary. The concrete
//! scenarios this crate is tested against (`iss = "foo:bar"` rejected,
//! `iss = "https://example.com"` accepted) are stricter than bare RFC 3986
//! `absolute-URI`, which would actually accept `foo:bar` as an opaque URI
//! with scheme `foo`. We therefore require a hierarchical authority
//! (`scheme "://" rest`) rather than any RFC 3986 absolute-URI, which is the
//! only reading consistent with both examples.

/// Returns `true` if `value` is either free of `:` (and therefore exempt
/// from the rule) or a valid `scheme://...` absolute URI.
pub fn is_valid_string_or_uri(value: &str) -> bool {
    if !value.contains(':') {
        return true;
    }
    match value.split_once(':') {
        Some((scheme, rest)) => is_valid_scheme(scheme) && rest.starts_with("//") && rest.len() > 2,
        None => false,
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_strings_pass() {
        assert!(is_valid_string_or_uri("joe"));
        assert!(is_valid_string_or_uri(""));
    }

    #[test]
    fn absolute_uri_with_authority_passes() {
        assert!(is_valid_string_or_uri("https://example.com"));
        assert!(is_valid_string_or_uri("urn://example/path"));
    }

    #[test]
    fn colon_without_authority_fails() {
        assert!(!is_valid_string_or_uri("foo:bar"));
        assert!(!is_valid_string_or_uri("a:b"));
    }

    #[test]
    fn invalid_scheme_chars_fail() {
        assert!(!is_valid_string_or_uri("1https://example.com"));
        assert!(!is_valid_string_or_uri(":no-scheme"));
    }
}
