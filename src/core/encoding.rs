//! Percent-encoding helpers matching the browser's URI component functions.
//!
//! `encodeURIComponent` escapes everything except ASCII alphanumerics and
//! `- _ . ! ~ * ' ( )`. The decoders reject malformed escapes and escapes
//! that decode to invalid UTF-8, as the browser functions do.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::HashParamError;

/// Characters escaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters `decodeURI` leaves escaped.
const URI_RESERVED: &[u8] = b";/?:@&=+$,#";

/// Percent-encode a string the way `encodeURIComponent` does.
///
/// # Examples
///
/// ```
/// use hash_params::encode_uri_component;
///
/// assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
/// assert_eq!(encode_uri_component("it's (ok)!"), "it's%20(ok)!");
/// ```
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Decode every percent-escape in a string, like `decodeURIComponent`.
///
/// # Examples
///
/// ```
/// use hash_params::decode_uri_component;
///
/// assert_eq!(decode_uri_component("a%20b%26c").unwrap(), "a b&c");
/// assert!(decode_uri_component("100%").is_err());
/// ```
pub fn decode_uri_component(value: &str) -> Result<String, HashParamError> {
    validate_escapes(value)?;
    percent_decode_str(value)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| HashParamError::MalformedUri(value.to_string()))
}

/// Decode percent-escapes like `decodeURI`: escapes of reserved URI
/// characters (`; / ? : @ & = + $ , #`) are kept as written.
pub fn decode_uri(value: &str) -> Result<String, HashParamError> {
    validate_escapes(value)?;

    let mut bytes = Vec::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = find_reserved_escape(rest) {
        bytes.extend(percent_decode_str(&rest[..pos]));
        bytes.extend_from_slice(rest[pos..pos + 3].as_bytes());
        rest = &rest[pos + 3..];
    }
    bytes.extend(percent_decode_str(rest));

    String::from_utf8(bytes).map_err(|_| HashParamError::MalformedUri(value.to_string()))
}

/// Every `%` must start a two-digit hex escape.
fn validate_escapes(value: &str) -> Result<(), HashParamError> {
    let bytes = value.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'%' {
            let valid = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(HashParamError::MalformedUri(value.to_string()));
            }
        }
    }
    Ok(())
}

/// Position of the first escape that decodes to a reserved character.
/// Assumes escapes were validated.
fn find_reserved_escape(value: &str) -> Option<usize> {
    value.match_indices('%').map(|(i, _)| i).find(|&i| {
        u8::from_str_radix(&value[i + 1..i + 3], 16)
            .map(|b| URI_RESERVED.contains(&b))
            .unwrap_or(false)
    })
}
