//! Reading and writing hash parameters on full URLs.
//!
//! These functions parse the URL with the `url` crate and work on its
//! fragment. The fragment of a parsed URL is already in its final form, so
//! values are read without any extra percent-decoding. Writing a hash that
//! ends up empty removes the fragment, `#` included.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::core::blob::{blob_from_base64, blob_to_base64, string_from_base64, string_to_base64};
use crate::core::fragment::parse_hash;
use crate::core::mutator::set_hash_params_in_hash;
use crate::core::scalar::{
    decode_bool, decode_uri_encoded, encode_bool, encode_float, encode_int, encode_uri_encoded,
    parse_float, parse_int,
};
use crate::error::HashParamError;
use crate::types::{Fragment, NumericWritePolicy};

/// Parse the hash of a URL into its prehash segment and parameters.
///
/// # Examples
///
/// ```
/// use hash_params::get_url_hash_params;
///
/// let fragment = get_url_hash_params("https://foo.com/?q=1#view?zoom=3").unwrap();
/// assert_eq!(fragment.prehash, "view");
/// assert_eq!(fragment.get("zoom"), Some("3"));
/// ```
pub fn get_url_hash_params(url: &str) -> Result<Fragment, HashParamError> {
    let parsed = Url::parse(url)?;
    Ok(parse_hash(parsed.fragment().unwrap_or("")))
}

/// Get a single hash parameter value from a URL.
pub fn get_hash_param_value(url: &str, key: &str) -> Result<Option<String>, HashParamError> {
    let mut fragment = get_url_hash_params(url)?;
    Ok(fragment.params.remove(key))
}

/// Set or remove a hash parameter in a URL.
///
/// # Examples
///
/// ```
/// use hash_params::set_hash_param_in_url;
///
/// let url = set_hash_param_in_url("https://foo.com/#page?a=1", "b", Some("2")).unwrap();
/// assert_eq!(url.as_str(), "https://foo.com/#page?a=1&b=2");
///
/// let url = set_hash_param_in_url("https://foo.com/#?a=1", "a", None).unwrap();
/// assert_eq!(url.as_str(), "https://foo.com/");
/// ```
pub fn set_hash_param_in_url(url: &str, key: &str, value: Option<&str>) -> Result<Url, HashParamError> {
    set_hash_params_in_url(url, [(key, value)])
}

/// Apply several hash parameter updates to a URL in one pass.
pub fn set_hash_params_in_url<I, K, V>(url: &str, updates: I) -> Result<Url, HashParamError>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut parsed = Url::parse(url)?;
    update_url_hash(&mut parsed, updates);
    Ok(parsed)
}

/// Remove a hash parameter from a URL.
pub fn delete_hash_param_from_url(url: &str, key: &str) -> Result<Url, HashParamError> {
    set_hash_param_in_url(url, key, None)
}

/// Apply updates to the fragment of an already parsed URL.
///
/// Returns whether the fragment was rewritten.
pub(crate) fn update_url_hash<I, K, V>(url: &mut Url, updates: I) -> bool
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let current = url.fragment().unwrap_or("").to_string();
    let updated = set_hash_params_in_hash(&current, updates);
    if updated == current.as_str() {
        return false;
    }

    if updated.is_empty() {
        url.set_fragment(None);
    } else {
        url.set_fragment(Some(&*updated));
    }
    true
}

/* json */

/// Store a value as base64-encoded canonical JSON. `None` removes the key.
pub fn set_hash_param_json_in_url<T: Serialize + ?Sized>(
    url: &str,
    key: &str,
    value: Option<&T>,
) -> Result<Url, HashParamError> {
    let encoded = value.map(blob_to_base64).transpose()?;
    set_hash_param_in_url(url, key, encoded.as_deref())
}

/// Read a base64-encoded JSON value. Empty values read as `None`.
pub fn get_hash_param_json_from_url<T: DeserializeOwned>(
    url: &str,
    key: &str,
) -> Result<Option<T>, HashParamError> {
    match get_hash_param_value(url, key)? {
        Some(value) => blob_from_base64(&value),
        None => Ok(None),
    }
}

/* float */

/// Store a float. `None` removes the key; zero is stored as `0`.
pub fn set_hash_param_float_in_url(url: &str, key: &str, value: Option<f64>) -> Result<Url, HashParamError> {
    let encoded = encode_float(value, NumericWritePolicy::default());
    set_hash_param_in_url(url, key, encoded.as_deref())
}

/// Read a float. Unparseable text reads as `NaN`; empty values read as `None`.
pub fn get_hash_param_float_from_url(url: &str, key: &str) -> Result<Option<f64>, HashParamError> {
    let value = get_hash_param_value(url, key)?;
    Ok(value.filter(|v| !v.is_empty()).map(|v| parse_float(&v)))
}

/* integer */

/// Store an integer. `None` removes the key; zero is stored as `0`.
pub fn set_hash_param_int_in_url(url: &str, key: &str, value: Option<i64>) -> Result<Url, HashParamError> {
    let encoded = encode_int(value, NumericWritePolicy::default());
    set_hash_param_in_url(url, key, encoded.as_deref())
}

/// Read an integer with `parseInt` rules. The result is an `f64` so that
/// unparseable text can read as `NaN`.
pub fn get_hash_param_int_from_url(url: &str, key: &str) -> Result<Option<f64>, HashParamError> {
    let value = get_hash_param_value(url, key)?;
    Ok(value.filter(|v| !v.is_empty()).map(|v| parse_int(&v)))
}

/* boolean */

/// Store a boolean. `true` is stored as `"true"`, `false` removes the key.
pub fn set_hash_param_bool_in_url(url: &str, key: &str, value: bool) -> Result<Url, HashParamError> {
    let encoded = encode_bool(value);
    set_hash_param_in_url(url, key, encoded.as_deref())
}

/// Read a boolean: true only when the stored value is exactly `"true"`.
pub fn get_hash_param_bool_from_url(url: &str, key: &str) -> Result<bool, HashParamError> {
    let value = get_hash_param_value(url, key)?;
    Ok(decode_bool(value.as_deref()))
}

/* base64 string */

/// Store a string as base64 of its UTF-8 bytes. `None` removes the key.
pub fn set_hash_param_base64_in_url(url: &str, key: &str, value: Option<&str>) -> Result<Url, HashParamError> {
    let encoded = value.map(string_to_base64);
    set_hash_param_in_url(url, key, encoded.as_deref())
}

/// Read a base64-encoded string, accepting the legacy double-encoded format.
pub fn get_hash_param_base64_from_url(url: &str, key: &str) -> Result<Option<String>, HashParamError> {
    match get_hash_param_value(url, key)? {
        Some(value) if !value.is_empty() => string_from_base64(&value).map(Some),
        _ => Ok(None),
    }
}

/* uri encoded string */

/// Store a string percent-encoded with `encodeURIComponent` rules.
pub fn set_hash_param_uri_encoded_in_url(
    url: &str,
    key: &str,
    value: Option<&str>,
) -> Result<Url, HashParamError> {
    let encoded = value.map(encode_uri_encoded);
    set_hash_param_in_url(url, key, encoded.as_deref())
}

/// Read a percent-encoded string.
pub fn get_hash_param_uri_decoded_from_url(url: &str, key: &str) -> Result<Option<String>, HashParamError> {
    match get_hash_param_value(url, key)? {
        Some(value) if !value.is_empty() => decode_uri_encoded(&value).map(Some),
        _ => Ok(None),
    }
}
