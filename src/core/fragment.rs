//! Hash fragment parsing and serialization.
//!
//! A hash has the shape `<prehash>?<key1>=<value1>&<key2>=<value2>`. The
//! prehash is opaque; only the part after the first `?` is split into
//! parameters. Serialization always emits keys in ascending order and never
//! percent-encodes values.

use std::str::FromStr;

use crate::core::encoding::decode_uri;
use crate::types::{DecodeMode, Fragment, HashParams};

/// Parse a hash string taken from a URL.
///
/// Any number of leading `#` characters are ignored. Values are stored
/// exactly as they appear.
///
/// # Examples
///
/// ```
/// use hash_params::parse_hash;
///
/// let fragment = parse_hash("#page?b=2&a=1");
/// assert_eq!(fragment.prehash, "page");
/// assert_eq!(fragment.get("a"), Some("1"));
/// assert_eq!(fragment.get("b"), Some("2"));
/// ```
pub fn parse_hash(hash: &str) -> Fragment {
    parse_hash_with(hash, DecodeMode::Raw)
}

/// Parse a raw hash string and apply one `decodeURI` pass to each value.
///
/// Values that are not validly escaped are kept unchanged.
///
/// # Examples
///
/// ```
/// use hash_params::parse_hash_decoded;
///
/// let fragment = parse_hash_decoded("?name=hello%20world&bad=100%");
/// assert_eq!(fragment.get("name"), Some("hello world"));
/// assert_eq!(fragment.get("bad"), Some("100%"));
/// ```
pub fn parse_hash_decoded(hash: &str) -> Fragment {
    parse_hash_with(hash, DecodeMode::DecodeUri)
}

/// Parse a hash string using the given decode mode.
pub fn parse_hash_with(hash: &str, mode: DecodeMode) -> Fragment {
    let hash = hash.trim_start_matches('#');

    match hash.split_once('?') {
        None => Fragment::new(hash, HashParams::new()),
        Some((prehash, query)) => Fragment::new(prehash, parse_params(query, mode)),
    }
}

/// Split a parameter string on `&`, then each segment on its first `=`.
///
/// Empty segments are dropped, a segment without `=` maps to an empty
/// value, and a repeated key keeps its last value.
fn parse_params(query: &str, mode: DecodeMode) -> HashParams {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.split_once('=').unwrap_or((segment, "")))
        .map(|(key, value)| (key.to_string(), decode_value(value, mode)))
        .collect()
}

fn decode_value(value: &str, mode: DecodeMode) -> String {
    match mode {
        DecodeMode::Raw => value.to_string(),
        DecodeMode::DecodeUri => decode_uri(value).unwrap_or_else(|_| value.to_string()),
    }
}

/// Serialize a prehash segment and parameters into a hash string.
///
/// The result has no leading `#`. An empty prehash with no parameters
/// gives an empty string; parameters without a prehash give `?k=v`.
///
/// # Examples
///
/// ```
/// use hash_params::{serialize_hash, HashParams};
///
/// let mut params = HashParams::new();
/// params.insert("zoom".to_string(), "3".to_string());
/// params.insert("center".to_string(), "home".to_string());
///
/// assert_eq!(serialize_hash("map", &params), "map?center=home&zoom=3");
/// assert_eq!(serialize_hash("", &params), "?center=home&zoom=3");
/// assert_eq!(serialize_hash("", &HashParams::new()), "");
/// ```
pub fn serialize_hash(prehash: &str, params: &HashParams) -> String {
    if params.is_empty() {
        return prehash.to_string();
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", prehash, query)
}

impl Fragment {
    /// Parse a hash string taken from a URL. See [`parse_hash`].
    pub fn parse(hash: &str) -> Self {
        parse_hash(hash)
    }
}

impl FromStr for Fragment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_hash(s))
    }
}
