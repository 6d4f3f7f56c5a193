//! Hash parameter access on a live location.
//!
//! [`HashLocation`] reads the current hash from its [`HashHost`] on every
//! call and never caches it. A write computes the new hash from a fresh
//! read and performs a single host write, so two writers working from stale
//! reads race and the last write wins.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::core::blob::{blob_from_base64, blob_to_base64, string_from_base64, string_to_base64};
use crate::core::fragment::parse_hash;
use crate::core::mutator::set_hash_params_in_hash;
use crate::core::scalar::{
    decode_bool, decode_uri_encoded, encode_bool, encode_float, encode_int, encode_uri_encoded,
    parse_float, parse_int,
};
use crate::error::HashParamError;
use crate::host::HashHost;
use crate::types::{Fragment, NumericWritePolicy, SetHashParamOpts};

/// Hash parameter operations over a host's live location.
pub struct HashLocation<H: HashHost> {
    host: Rc<H>,
}

impl<H: HashHost> Clone for HashLocation<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
        }
    }
}

impl<H: HashHost> HashLocation<H> {
    /// Wrap a host.
    pub fn new(host: Rc<H>) -> Self {
        Self { host }
    }

    /// The wrapped host.
    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// Parse the current hash.
    pub fn get_hash_params(&self) -> Fragment {
        parse_hash(&self.host.read_hash())
    }

    /// Get a single parameter from the current hash.
    pub fn get_hash_param(&self, key: &str) -> Option<String> {
        self.get_hash_params().params.remove(key)
    }

    /// Set or remove a parameter.
    ///
    /// Returns `false` without touching the host when the hash would not
    /// change.
    pub fn set_hash_param(&self, key: &str, value: Option<&str>, opts: SetHashParamOpts) -> bool {
        self.set_hash_params([(key, value)], opts)
    }

    /// Apply several updates with a single host write.
    pub fn set_hash_params<I, K, V>(&self, updates: I, opts: SetHashParamOpts) -> bool
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let current = self.host.read_hash();
        let current = current.strip_prefix('#').unwrap_or(&current);

        let updated = set_hash_params_in_hash(current, updates);
        if updated == current {
            trace!(hash = current, "hash unchanged, skipping write");
            return false;
        }

        if opts.push_history {
            debug!(hash = %updated, "writing hash with new history entry");
            self.host.write_hash_push_history(&updated);
        } else {
            debug!(hash = %updated, "replacing hash in current history entry");
            self.host.write_hash_replace_history(&updated);
            // Replacing history does not notify on its own
            self.host.emit_hash_change();
        }
        true
    }

    /// Remove a parameter.
    pub fn delete_hash_param(&self, key: &str, opts: SetHashParamOpts) -> bool {
        self.set_hash_param(key, None, opts)
    }

    /* json */

    /// Read a base64-encoded JSON value. Empty values read as `None`.
    pub fn get_hash_param_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, HashParamError> {
        match self.get_hash_param(key) {
            Some(value) => blob_from_base64(&value),
            None => Ok(None),
        }
    }

    /// Store a value as base64-encoded canonical JSON. `None` removes the key.
    pub fn set_hash_param_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: Option<&T>,
        opts: SetHashParamOpts,
    ) -> Result<bool, HashParamError> {
        let encoded = value.map(blob_to_base64).transpose()?;
        Ok(self.set_hash_param(key, encoded.as_deref(), opts))
    }

    /* float */

    /// Read a float. Unparseable text reads as `NaN`.
    pub fn get_hash_param_float(&self, key: &str) -> Option<f64> {
        self.get_hash_param(key)
            .filter(|v| !v.is_empty())
            .map(|v| parse_float(&v))
    }

    /// Store a float. `None` removes the key.
    pub fn set_hash_param_float(&self, key: &str, value: Option<f64>, opts: SetHashParamOpts) -> bool {
        let encoded = encode_float(value, NumericWritePolicy::default());
        self.set_hash_param(key, encoded.as_deref(), opts)
    }

    /* integer */

    /// Read an integer with `parseInt` rules; `NaN` when unparseable.
    pub fn get_hash_param_int(&self, key: &str) -> Option<f64> {
        self.get_hash_param(key)
            .filter(|v| !v.is_empty())
            .map(|v| parse_int(&v))
    }

    /// Store an integer. `None` removes the key.
    pub fn set_hash_param_int(&self, key: &str, value: Option<i64>, opts: SetHashParamOpts) -> bool {
        let encoded = encode_int(value, NumericWritePolicy::default());
        self.set_hash_param(key, encoded.as_deref(), opts)
    }

    /* boolean */

    /// Read a boolean: true only for the literal `"true"`.
    pub fn get_hash_param_bool(&self, key: &str) -> bool {
        decode_bool(self.get_hash_param(key).as_deref())
    }

    /// Store a boolean. `false` removes the key.
    pub fn set_hash_param_bool(&self, key: &str, value: bool, opts: SetHashParamOpts) -> bool {
        self.set_hash_param(key, encode_bool(value).as_deref(), opts)
    }

    /* base64 string */

    /// Read a base64-encoded string.
    pub fn get_hash_param_base64(&self, key: &str) -> Result<Option<String>, HashParamError> {
        match self.get_hash_param(key) {
            Some(value) if !value.is_empty() => string_from_base64(&value).map(Some),
            _ => Ok(None),
        }
    }

    /// Store a string as base64. `None` removes the key.
    pub fn set_hash_param_base64(&self, key: &str, value: Option<&str>, opts: SetHashParamOpts) -> bool {
        let encoded = value.map(string_to_base64);
        self.set_hash_param(key, encoded.as_deref(), opts)
    }

    /* uri encoded string */

    /// Read a percent-encoded string.
    pub fn get_hash_param_uri_decoded(&self, key: &str) -> Result<Option<String>, HashParamError> {
        match self.get_hash_param(key) {
            Some(value) if !value.is_empty() => decode_uri_encoded(&value).map(Some),
            _ => Ok(None),
        }
    }

    /// Store a string percent-encoded. `None` removes the key.
    pub fn set_hash_param_uri_encoded(&self, key: &str, value: Option<&str>, opts: SetHashParamOpts) -> bool {
        let encoded = value.map(encode_uri_encoded);
        self.set_hash_param(key, encoded.as_deref(), opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use serde_json::{json, Value};

    fn location(url: &str) -> HashLocation<MemoryHost> {
        HashLocation::new(Rc::new(MemoryHost::new(url).unwrap()))
    }

    #[test]
    fn test_replace_write_notifies_once() {
        let loc = location("https://foo.com/?q=1#page");
        assert!(loc.set_hash_param("a", Some("1"), SetHashParamOpts::default()));

        let host = loc.host();
        assert_eq!(host.current_url(), "https://foo.com/?q=1#page?a=1");
        assert_eq!(host.history().len(), 1);
        assert_eq!(host.notification_count(), 1);
    }

    #[test]
    fn test_push_write_adds_history() {
        let loc = location("https://foo.com/");
        assert!(loc.set_hash_param("a", Some("1"), SetHashParamOpts::push()));

        let host = loc.host();
        assert_eq!(host.history(), vec!["https://foo.com/", "https://foo.com/#?a=1"]);
        assert_eq!(host.notification_count(), 1);
    }

    #[test]
    fn test_noop_write_touches_nothing() {
        let loc = location("https://foo.com/#?a=1");
        assert!(!loc.set_hash_param("a", Some("1"), SetHashParamOpts::default()));
        assert!(!loc.delete_hash_param("missing", SetHashParamOpts::push()));

        let host = loc.host();
        assert_eq!(host.notification_count(), 0);
        assert_eq!(host.history().len(), 1);
    }

    #[test]
    fn test_batch_is_one_write() {
        let loc = location("https://foo.com/#?a=1");
        let written = loc.set_hash_params(
            [("a", None), ("b", Some("2")), ("c", Some("3"))],
            SetHashParamOpts::push(),
        );

        assert!(written);
        assert_eq!(loc.host().notification_count(), 1);
        assert_eq!(loc.host().read_hash(), "?b=2&c=3");
    }

    #[test]
    fn test_typed_round_trips() {
        let loc = location("https://foo.com/");
        let opts = SetHashParamOpts::default();

        loc.set_hash_param_json("blob", Some(&json!({"k": [1, 2]})), opts).unwrap();
        assert_eq!(loc.get_hash_param_json::<Value>("blob").unwrap(), Some(json!({"k": [1, 2]})));

        loc.set_hash_param_float("f", Some(0.5), opts);
        assert_eq!(loc.get_hash_param_float("f"), Some(0.5));

        loc.set_hash_param_int("i", Some(-3), opts);
        assert_eq!(loc.get_hash_param_int("i"), Some(-3.0));

        loc.set_hash_param_bool("b", true, opts);
        assert!(loc.get_hash_param_bool("b"));
        loc.set_hash_param_bool("b", false, opts);
        assert_eq!(loc.get_hash_param("b"), None);

        loc.set_hash_param_base64("s", Some("x y"), opts);
        assert_eq!(loc.get_hash_param_base64("s").unwrap(), Some("x y".to_string()));

        loc.set_hash_param_uri_encoded("u", Some("a&b"), opts);
        assert_eq!(loc.get_hash_param("u"), Some("a%26b".to_string()));
        assert_eq!(loc.get_hash_param_uri_decoded("u").unwrap(), Some("a&b".to_string()));
    }

    #[test]
    fn test_stale_writers_last_write_wins() {
        let loc = location("https://foo.com/#?n=0");
        let other = loc.clone();

        // Both compute from the same read of the hash
        let first = set_hash_params_in_hash(&loc.host().read_hash(), [("n", Some("1"))]).into_owned();
        let second = set_hash_params_in_hash(&other.host().read_hash(), [("m", Some("1"))]).into_owned();
        loc.host().write_hash_replace_history(&first);
        other.host().write_hash_replace_history(&second);

        assert_eq!(loc.get_hash_param("n"), Some("0".to_string()));
        assert_eq!(loc.get_hash_param("m"), Some("1".to_string()));
    }
}
