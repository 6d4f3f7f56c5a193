//! URL-level hash parameter access.
//!
//! This module wraps the core hash transforms around `url::Url`:
//! - Reading the prehash segment and parameters of a URL
//! - Setting, batching and deleting parameters
//! - Typed getters and setters for every value codec

pub mod hash;

// Re-export main functionality
pub use hash::{
    delete_hash_param_from_url, get_hash_param_base64_from_url, get_hash_param_bool_from_url,
    get_hash_param_float_from_url, get_hash_param_int_from_url, get_hash_param_json_from_url,
    get_hash_param_uri_decoded_from_url, get_hash_param_value, get_url_hash_params,
    set_hash_param_base64_in_url, set_hash_param_bool_in_url, set_hash_param_float_in_url,
    set_hash_param_in_url, set_hash_param_int_in_url, set_hash_param_json_in_url,
    set_hash_param_uri_encoded_in_url, set_hash_params_in_url,
};
