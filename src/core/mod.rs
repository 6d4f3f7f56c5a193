//! Core hash fragment functionality.
//!
//! This module contains the pure string transforms:
//! - Parsing and serializing hash fragments
//! - Applying single and batched parameter updates
//! - Base64, JSON, numeric, boolean and percent-encoded value codecs

pub mod blob;
pub mod encoding;
pub mod fragment;
pub mod mutator;
pub mod scalar;

// Re-export main functionality
pub use blob::{blob_from_base64, blob_to_base64, canonical_json, string_from_base64, string_to_base64};
pub use encoding::{decode_uri, decode_uri_component, encode_uri_component};
pub use fragment::{parse_hash, parse_hash_decoded, parse_hash_with, serialize_hash};
pub use mutator::{set_hash_param_in_hash, set_hash_params_in_hash};
pub use scalar::{
    decode_bool, decode_uri_encoded, encode_bool, encode_float, encode_int, encode_uri_encoded,
    float_to_string, parse_float, parse_int,
};
