//! String codecs for numbers, booleans and percent-encoded text.
//!
//! Number parsing is prefix-based and never fails: text with no leading
//! number decodes to `f64::NAN`. Integer reads also return `f64` so that
//! the NaN result has somewhere to live.

use crate::core::encoding::{decode_uri_component, encode_uri_component};
use crate::error::HashParamError;
use crate::types::NumericWritePolicy;

const TRUE: &str = "true";

/// Format a float the way a browser prints numbers.
///
/// Whole numbers have no fractional part, `-0` prints as `0` and infinities
/// print as `Infinity` / `-Infinity`.
pub fn float_to_string(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        value.to_string()
    }
}

/// Encode an optional float for storage. `None` means "remove the key".
pub fn encode_float(value: Option<f64>, policy: NumericWritePolicy) -> Option<String> {
    let value = value?;
    if policy == NumericWritePolicy::ZeroRemovesKey && (value == 0.0 || value.is_nan()) {
        return None;
    }
    Some(float_to_string(value))
}

/// Encode an optional integer for storage. `None` means "remove the key".
pub fn encode_int(value: Option<i64>, policy: NumericWritePolicy) -> Option<String> {
    let value = value?;
    if policy == NumericWritePolicy::ZeroRemovesKey && value == 0 {
        return None;
    }
    Some(value.to_string())
}

/// Parse the longest leading decimal number, like `parseFloat`.
///
/// # Examples
///
/// ```
/// use hash_params::parse_float;
///
/// assert_eq!(parse_float("3.25"), 3.25);
/// assert_eq!(parse_float("  -1.5e3px"), -1500.0);
/// assert_eq!(parse_float("Infinity"), f64::INFINITY);
/// assert!(parse_float("abc").is_nan());
/// ```
pub fn parse_float(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Parse the longest leading integer, like `parseInt` without a radix.
///
/// A `0x` / `0X` prefix switches to hexadecimal.
///
/// # Examples
///
/// ```
/// use hash_params::parse_int;
///
/// assert_eq!(parse_int("42"), 42.0);
/// assert_eq!(parse_int("12.9"), 12.0);
/// assert_eq!(parse_int("-0x1F"), -31.0);
/// assert!(parse_int("px").is_nan());
/// ```
pub fn parse_int(value: &str) -> f64 {
    let s = value.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut result: Option<f64> = None;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        result = Some(result.unwrap_or(0.0) * f64::from(radix) + f64::from(digit));
    }

    match result {
        Some(n) if negative => -n,
        Some(n) => n,
        None => f64::NAN,
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Encode a boolean. `false` removes the key rather than storing `"false"`.
pub fn encode_bool(value: bool) -> Option<String> {
    value.then(|| TRUE.to_string())
}

/// Decode a stored boolean: only the literal `"true"` is true.
pub fn decode_bool(value: Option<&str>) -> bool {
    value == Some(TRUE)
}

/// Encode text with `encodeURIComponent` for storage.
pub fn encode_uri_encoded(value: &str) -> String {
    encode_uri_component(value)
}

/// Decode text written by [`encode_uri_encoded`].
pub fn decode_uri_encoded(value: &str) -> Result<String, HashParamError> {
    decode_uri_component(value)
}
