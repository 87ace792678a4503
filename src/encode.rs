use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the RFC 3986 unreserved set: `A-Z a-z 0-9 - . _ ~`.
///
/// Note that `! ' ( ) *` are escaped too, unlike most URI-component encoders.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string the way OAuth 1.0a requires (RFC 5849 section 3.6).
///
/// Non-ASCII characters are encoded as their UTF-8 octets. Hex digits are
/// always uppercase.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}
