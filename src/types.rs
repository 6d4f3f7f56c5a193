//! Core data structures for hash fragment parsing and writing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::fragment::serialize_hash;

/// Key-value pairs found after the `?` inside a hash fragment.
///
/// A `BTreeMap` keeps keys in ascending order, so two maps with the same
/// pairs always serialize identically.
pub type HashParams = BTreeMap<String, String>;

/// A hash fragment split into its prehash segment and parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// Opaque text between the leading `#` and the first `?` (may be empty)
    pub prehash: String,
    /// Parameters after the `?`
    pub params: HashParams,
}

impl Fragment {
    /// Create a fragment from a prehash segment and parameters.
    pub fn new(prehash: impl Into<String>, params: HashParams) -> Self {
        Self {
            prehash: prehash.into(),
            params,
        }
    }

    /// Look up a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Check if both the prehash segment and the parameters are empty.
    pub fn is_empty(&self) -> bool {
        self.prehash.is_empty() && self.params.is_empty()
    }

    /// Serialize back into a hash string without the leading `#`.
    pub fn to_hash_string(&self) -> String {
        serialize_hash(&self.prehash, &self.params)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hash_string())
    }
}

/// How parameter values are treated while parsing a hash string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// Values are kept exactly as found. Use this for hashes read from a
    /// parsed URL, which are already decoded once.
    #[default]
    Raw,
    /// Each value gets one `decodeURI`-style pass. A value that fails to
    /// decode is kept unchanged.
    DecodeUri,
}

/// Options for writing a parameter into a live location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetHashParamOpts {
    /// Add a new history entry instead of replacing the current one.
    pub push_history: bool,
}

impl SetHashParamOpts {
    /// Options that push a new history entry.
    pub fn push() -> Self {
        Self { push_history: true }
    }
}

/// What a numeric setter does with a zero value.
///
/// Older releases treated `0` as "no value" and removed the key. That made a
/// stored zero impossible to write, so the default now stores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericWritePolicy {
    /// `0` is written as `"0"`; only `None` removes the key.
    #[default]
    KeepZero,
    /// `0` (and NaN) removes the key, like `None`.
    ZeroRemovesKey,
}
