//! hash-params - application state in the URL hash
//!
//! This crate reads and writes `key=value` pairs stored in a URL fragment
//! after an optional prehash segment:
//!
//! ```text
//! https://example.com/app#prehashSegment?key1=value1&key2=value2
//! ```
//!
//! # Features
//!
//! - **Deterministic**: keys are always written in ascending order, so equal
//!   parameters give byte-identical hashes
//! - **No-op aware**: updates that change nothing hand back the input
//!   untouched and skip host writes
//! - **Typed values**: JSON blobs, base64 strings, floats, integers,
//!   booleans and percent-encoded strings
//! - **Backward compatible**: base64 values written by the older
//!   double-encoding format still decode
//! - **Host agnostic**: the live location is an injected [`HashHost`]
//!
//! # Quick Start
//!
//! ```
//! use hash_params::{get_hash_param_json_from_url, set_hash_param_in_url, set_hash_param_json_in_url};
//! use serde_json::json;
//!
//! let url = set_hash_param_in_url("https://example.com/#map?zoom=3", "zoom", Some("4"))?;
//! assert_eq!(url.as_str(), "https://example.com/#map?zoom=4");
//!
//! let url = set_hash_param_json_in_url(url.as_str(), "view", Some(&json!({"x": 1})))?;
//! let view: Option<serde_json::Value> = get_hash_param_json_from_url(url.as_str(), "view")?;
//! assert_eq!(view, Some(json!({"x": 1})));
//! # Ok::<(), hash_params::HashParamError>(())
//! ```
//!
//! # Live locations
//!
//! ```
//! use std::rc::Rc;
//! use hash_params::{HashHost, HashLocation, HashParamBinding, BoolCodec, MemoryHost, SetHashParamOpts};
//!
//! let host = Rc::new(MemoryHost::new("https://example.com/")?);
//! let location = HashLocation::new(Rc::clone(&host));
//! let flag = HashParamBinding::new(Rc::clone(&host), "debug", BoolCodec, None);
//!
//! location.set_hash_param_bool("debug", true, SetHashParamOpts::default());
//! assert_eq!(host.read_hash(), "?debug=true");
//! assert_eq!(flag.value(), Ok(Some(true)));
//! # Ok::<(), hash_params::HashParamError>(())
//! ```
//!
//! # Wire Format
//!
//! | Part | Form |
//! |------|------|
//! | prehash | opaque text before the first `?` |
//! | parameters | `key=value` joined with `&`, keys sorted |
//! | values | written verbatim, never percent-encoded by this crate |
//!
//! An empty prehash with no parameters serializes to an empty string.
//!
//! # Error Handling
//!
//! Fallible functions return `Result<T, HashParamError>`:
//!
//! - Invalid base64, invalid UTF-8 or invalid JSON in a stored value
//! - Malformed percent-escapes in URI-encoded values
//! - URLs that fail to parse
//!
//! Unparseable numbers are not errors; they read as `NaN`.

// Re-export core transforms
pub use crate::core::{parse_hash, parse_hash_decoded, parse_hash_with, serialize_hash};
pub use crate::core::{set_hash_param_in_hash, set_hash_params_in_hash};
pub use crate::core::{blob_from_base64, blob_to_base64, canonical_json, string_from_base64, string_to_base64};
pub use crate::core::{decode_uri, decode_uri_component, encode_uri_component};
pub use crate::core::{
    decode_bool, decode_uri_encoded, encode_bool, encode_float, encode_int, encode_uri_encoded,
    float_to_string, parse_float, parse_int,
};

// Re-export URL-level operations
pub use crate::url::{
    delete_hash_param_from_url, get_hash_param_base64_from_url, get_hash_param_bool_from_url,
    get_hash_param_float_from_url, get_hash_param_int_from_url, get_hash_param_json_from_url,
    get_hash_param_uri_decoded_from_url, get_hash_param_value, get_url_hash_params,
    set_hash_param_base64_in_url, set_hash_param_bool_in_url, set_hash_param_float_in_url,
    set_hash_param_in_url, set_hash_param_int_in_url, set_hash_param_json_in_url,
    set_hash_param_uri_encoded_in_url, set_hash_params_in_url,
};

// Re-export live location types
pub use binding::{
    Base64Codec, BindingValue, BoolCodec, FloatCodec, HashParamBinding, HashParamCodec, IntCodec,
    JsonCodec, StringCodec, SubscriptionId, UriEncodedCodec,
};
pub use host::{HashChangeListener, HashHost, ListenerId, MemoryHost};
pub use location::HashLocation;

// Re-export public types
pub use error::HashParamError;
pub use types::{DecodeMode, Fragment, HashParams, NumericWritePolicy, SetHashParamOpts};

// Module declarations
pub mod binding;
pub mod core;
pub mod error;
pub mod host;
pub mod location;
pub mod types;
pub mod url;
