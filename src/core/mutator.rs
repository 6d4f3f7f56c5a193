//! Applying parameter updates to a hash string.
//!
//! An update of `Some(value)` sets a key, `None` removes it. When no update
//! changes the parsed parameters the input is handed back as
//! [`Cow::Borrowed`], byte-for-byte, so callers can skip the write.

use std::borrow::Cow;

use crate::core::fragment::parse_hash;
use crate::types::HashParams;

/// Set or remove a single parameter in a hash string.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
/// use hash_params::set_hash_param_in_hash;
///
/// let hash = "section?a=1";
/// assert_eq!(set_hash_param_in_hash(hash, "b", Some("2")), "section?a=1&b=2");
/// assert_eq!(set_hash_param_in_hash(hash, "a", None), "section");
///
/// // Nothing to do: the input comes back untouched.
/// assert!(matches!(set_hash_param_in_hash(hash, "a", Some("1")), Cow::Borrowed(_)));
/// ```
pub fn set_hash_param_in_hash<'a>(hash: &'a str, key: &str, value: Option<&str>) -> Cow<'a, str> {
    set_hash_params_in_hash(hash, [(key, value)])
}

/// Apply several parameter updates in one parse and serialize pass.
///
/// Updates are applied in iteration order, so the result equals running
/// [`set_hash_param_in_hash`] once per update.
///
/// # Examples
///
/// ```
/// use hash_params::set_hash_params_in_hash;
///
/// let hash = "#section?key1=oldvalue&key2=keepvalue";
/// let updated = set_hash_params_in_hash(hash, [("key1", None), ("key3", Some("newvalue"))]);
/// assert_eq!(updated, "section?key2=keepvalue&key3=newvalue");
/// ```
pub fn set_hash_params_in_hash<'a, I, K, V>(hash: &'a str, updates: I) -> Cow<'a, str>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut fragment = parse_hash(hash);

    let mut changed = false;
    for (key, value) in updates {
        let value = value.as_ref().map(|v| v.as_ref());
        changed |= apply_update(&mut fragment.params, key.as_ref(), value);
    }

    if !changed {
        return Cow::Borrowed(hash);
    }

    Cow::Owned(fragment.to_hash_string())
}

/// Apply one update to a parameter map, returning whether it changed.
pub(crate) fn apply_update(params: &mut HashParams, key: &str, value: Option<&str>) -> bool {
    match value {
        None => params.remove(key).is_some(),
        Some(value) => {
            if params.get(key).map(String::as_str) == Some(value) {
                false
            } else {
                params.insert(key.to_string(), value.to_string());
                true
            }
        }
    }
}
