//! Base64 codecs for plain strings and JSON blobs.
//!
//! Values are written as standard base64 of the UTF-8 text. Older writers
//! percent-encoded the text before base64-encoding it; those values are
//! still readable. Decoding tells the two formats apart by looking for a `%`
//! in the base64-decoded text: if present, the text is percent-decoded once
//! more. There is no other version marker.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::encoding::decode_uri_component;
use crate::error::HashParamError;

/// Standard alphabet, padded on encode, lenient about padding and trailing
/// bits on decode.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Percent-encoded `=` left behind when padded base64 was URL-encoded.
const ENCODED_PADDING: &str = "%3D";

/// Base64-encode the UTF-8 bytes of a string.
///
/// # Examples
///
/// ```
/// use hash_params::string_to_base64;
///
/// assert_eq!(string_to_base64("Hello, World!"), "SGVsbG8sIFdvcmxkIQ==");
/// ```
pub fn string_to_base64(value: &str) -> String {
    BASE64.encode(value.as_bytes())
}

/// Decode a base64 string value, accepting the legacy double-encoded format.
///
/// Trailing `%3D` sequences are dropped before decoding.
///
/// # Examples
///
/// ```
/// use hash_params::string_from_base64;
///
/// // Current format
/// assert_eq!(string_from_base64("SGVsbG8sIFdvcmxkIQ==").unwrap(), "Hello, World!");
/// // Legacy format: base64 of the percent-encoded text
/// assert_eq!(string_from_base64("SGVsbG8lMkMlMjBXb3JsZCE=").unwrap(), "Hello, World!");
/// // Percent-encoded padding
/// assert_eq!(string_from_base64("SGVsbG8lMkMlMjBXb3JsZCE%3D").unwrap(), "Hello, World!");
/// ```
pub fn string_from_base64(value: &str) -> Result<String, HashParamError> {
    let mut value = value;
    while let Some(stripped) = value.strip_suffix(ENCODED_PADDING) {
        value = stripped;
    }

    let decoded = String::from_utf8(BASE64.decode(value)?)?;

    if decoded.contains('%') {
        decode_uri_component(&decoded)
    } else {
        Ok(decoded)
    }
}

/// Serialize a value to JSON with object keys in sorted order.
///
/// Equal values always produce identical text, whatever order their maps
/// were built in.
pub fn canonical_json<T: Serialize + ?Sized>(blob: &T) -> Result<String, HashParamError> {
    // serde_json's Value keeps object keys in a BTreeMap
    let value = serde_json::to_value(blob)?;
    Ok(serde_json::to_string(&value)?)
}

/// Encode a value as base64 of its canonical JSON.
///
/// # Examples
///
/// ```
/// use hash_params::blob_to_base64;
/// use serde_json::json;
///
/// let encoded = blob_to_base64(&json!({"foo": "bar", "1": true})).unwrap();
/// assert_eq!(encoded, "eyIxIjp0cnVlLCJmb28iOiJiYXIifQ==");
/// ```
pub fn blob_to_base64<T: Serialize + ?Sized>(blob: &T) -> Result<String, HashParamError> {
    Ok(string_to_base64(&canonical_json(blob)?))
}

/// Decode a base64 JSON value written by [`blob_to_base64`] or by the
/// legacy double-encoding writer.
///
/// An empty input decodes to `None`. Invalid base64 and invalid JSON are
/// errors.
pub fn blob_from_base64<T: DeserializeOwned>(value: &str) -> Result<Option<T>, HashParamError> {
    if value.is_empty() {
        return Ok(None);
    }

    let json = string_from_base64(value)?;
    Ok(Some(serde_json::from_str(&json)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encoding::encode_uri_component;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn legacy_encode(text: &str) -> String {
        BASE64.encode(encode_uri_component(text))
    }

    #[test]
    fn test_string_round_trip() {
        for input in ["", "plain", "with spaces & symbols = ?", "日本語テキスト"] {
            let encoded = string_to_base64(input);
            assert_eq!(string_from_base64(&encoded).unwrap(), input);
        }
    }

    #[test]
    fn test_string_legacy_format() {
        let legacy = legacy_encode("Hello, World!");
        assert_eq!(legacy, "SGVsbG8lMkMlMjBXb3JsZCE=");
        assert_eq!(string_from_base64(&legacy).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_trailing_encoded_padding_is_trimmed() {
        assert_eq!(
            string_from_base64("SGVsbG8sIFdvcmxkIQ%3D%3D").unwrap(),
            "Hello, World!"
        );
    }

    #[test]
    fn test_missing_padding_is_accepted() {
        assert_eq!(string_from_base64("SGVsbG8sIFdvcmxkIQ").unwrap(), "Hello, World!");
    }

    #[test]
    fn test_invalid_base64_is_error() {
        assert!(matches!(
            string_from_base64("not base64!"),
            Err(HashParamError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let encoded = BASE64.encode([0xff, 0xfe, 0xfd]);
        assert_eq!(string_from_base64(&encoded), Err(HashParamError::InvalidUtf8));
    }

    #[test]
    fn test_literal_percent_is_treated_as_legacy() {
        // A current-format value containing '%' is indistinguishable from legacy data
        let encoded = string_to_base64("50%25 off");
        assert_eq!(string_from_base64(&encoded).unwrap(), "50% off");

        let encoded = string_to_base64("100%");
        assert!(matches!(
            string_from_base64(&encoded),
            Err(HashParamError::MalformedUri(_))
        ));
    }

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let mut inner = HashMap::new();
        inner.insert("z", 1);
        inner.insert("a", 2);
        let mut outer = HashMap::new();
        outer.insert("outer_b", inner.clone());
        outer.insert("outer_a", inner);

        assert_eq!(
            canonical_json(&outer).unwrap(),
            r#"{"outer_a":{"a":2,"z":1},"outer_b":{"a":2,"z":1}}"#
        );
    }

    #[test]
    fn test_blob_encoding_is_stable() {
        let first = blob_to_base64(&json!({"b": [1, 2], "a": {"y": null, "x": "s"}})).unwrap();
        let second = blob_to_base64(&json!({"a": {"x": "s", "y": null}, "b": [1, 2]})).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_blob_round_trip() {
        let blob = json!({"name": "café = ok?", "count": 3, "tags": ["a", "b"], "on": false});
        let encoded = blob_to_base64(&blob).unwrap();
        let decoded: Value = blob_from_base64(&encoded).unwrap().unwrap();
        assert_eq!(decoded, blob);
    }

    #[test]
    fn test_blob_legacy_format() {
        let legacy = legacy_encode(r#"{"test":"data","number":42}"#);
        assert_eq!(legacy, "JTdCJTIydGVzdCUyMiUzQSUyMmRhdGElMjIlMkMlMjJudW1iZXIlMjIlM0E0MiU3RA==");

        let decoded: Value = blob_from_base64(&legacy).unwrap().unwrap();
        assert_eq!(decoded, json!({"test": "data", "number": 42}));
    }

    #[test]
    fn test_blob_empty_is_none() {
        let decoded: Option<Value> = blob_from_base64("").unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_blob_invalid_json_is_error() {
        let encoded = string_to_base64("{not json");
        let result: Result<Option<Value>, _> = blob_from_base64(&encoded);
        assert!(matches!(result, Err(HashParamError::Json(_))));
    }
}
