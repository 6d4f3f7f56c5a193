//! Typed, observable bindings to a single hash parameter.
//!
//! A [`HashParamBinding`] listens for the host's hash change notifications.
//! On each one it re-reads the hash, decodes its parameter and hands the new
//! value to its own subscribers, synchronously and without buffering.
//! Writes go through [`HashLocation`], so a write also triggers that
//! refresh once the host notifies.
//!
//! How a parameter maps to a typed value is described by a
//! [`HashParamCodec`]; this module ships one per supported encoding.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::core::blob::{blob_from_base64, blob_to_base64, string_from_base64, string_to_base64};
use crate::core::fragment::parse_hash;
use crate::core::scalar::{
    decode_bool, decode_uri_encoded, encode_bool, encode_float, encode_int, encode_uri_encoded,
    parse_float, parse_int,
};
use crate::error::HashParamError;
use crate::host::{HashHost, ListenerId};
use crate::location::HashLocation;
use crate::types::{NumericWritePolicy, SetHashParamOpts};

/// The value a binding publishes: decoded, absent, or a decode error.
pub type BindingValue<V> = Result<Option<V>, HashParamError>;

/// Identifies a binding subscriber.
pub type SubscriptionId = u64;

/// Converts between a stored parameter string and a typed value.
pub trait HashParamCodec {
    /// Type produced when reading.
    type Value: Clone;
    /// Type accepted when writing.
    type Input: ?Sized;

    /// Whether an empty stored string reads as absent.
    const EMPTY_IS_ABSENT: bool = true;

    /// Encode a value. `None` means the key should be removed.
    fn encode(&self, value: &Self::Input) -> Result<Option<String>, HashParamError>;

    /// Decode a stored, non-absent string.
    fn decode(&self, raw: &str) -> Result<Self::Value, HashParamError>;

    /// Value reported when the key is absent and no default was given.
    fn absent(&self) -> Option<Self::Value> {
        None
    }
}

/// Plain string, stored as-is. An empty string is a present value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl HashParamCodec for StringCodec {
    type Value = String;
    type Input = str;

    const EMPTY_IS_ABSENT: bool = false;

    fn encode(&self, value: &str) -> Result<Option<String>, HashParamError> {
        Ok(Some(value.to_string()))
    }

    fn decode(&self, raw: &str) -> Result<String, HashParamError> {
        Ok(raw.to_string())
    }
}

/// String stored as base64 of its UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl HashParamCodec for Base64Codec {
    type Value = String;
    type Input = str;

    fn encode(&self, value: &str) -> Result<Option<String>, HashParamError> {
        Ok(Some(string_to_base64(value)))
    }

    fn decode(&self, raw: &str) -> Result<String, HashParamError> {
        string_from_base64(raw)
    }
}

/// Any serde value stored as base64 of its canonical JSON.
pub struct JsonCodec<T>(PhantomData<fn() -> T>);

impl<T> JsonCodec<T> {
    /// Create a codec for `T`.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize + DeserializeOwned + Clone> HashParamCodec for JsonCodec<T> {
    type Value = T;
    type Input = T;

    fn encode(&self, value: &T) -> Result<Option<String>, HashParamError> {
        blob_to_base64(value).map(Some)
    }

    fn decode(&self, raw: &str) -> Result<T, HashParamError> {
        blob_from_base64(raw)?.ok_or_else(|| HashParamError::Json("empty value".to_string()))
    }
}

/// Float stored as decimal text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCodec {
    /// How zero and `NaN` are written.
    pub policy: NumericWritePolicy,
}

impl HashParamCodec for FloatCodec {
    type Value = f64;
    type Input = f64;

    fn encode(&self, value: &f64) -> Result<Option<String>, HashParamError> {
        Ok(encode_float(Some(*value), self.policy))
    }

    fn decode(&self, raw: &str) -> Result<f64, HashParamError> {
        Ok(parse_float(raw))
    }
}

/// Integer stored as decimal text, read back with `parseInt` rules.
///
/// Reads produce `f64` so that unparseable text can read as `NaN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec {
    /// How zero is written.
    pub policy: NumericWritePolicy,
}

impl HashParamCodec for IntCodec {
    type Value = f64;
    type Input = i64;

    fn encode(&self, value: &i64) -> Result<Option<String>, HashParamError> {
        Ok(encode_int(Some(*value), self.policy))
    }

    fn decode(&self, raw: &str) -> Result<f64, HashParamError> {
        Ok(parse_int(raw))
    }
}

/// Boolean stored as `"true"`; `false` removes the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl HashParamCodec for BoolCodec {
    type Value = bool;
    type Input = bool;

    fn encode(&self, value: &bool) -> Result<Option<String>, HashParamError> {
        Ok(encode_bool(*value))
    }

    fn decode(&self, raw: &str) -> Result<bool, HashParamError> {
        Ok(decode_bool(Some(raw)))
    }

    fn absent(&self) -> Option<bool> {
        Some(false)
    }
}

/// String stored percent-encoded with `encodeURIComponent` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriEncodedCodec;

impl HashParamCodec for UriEncodedCodec {
    type Value = String;
    type Input = str;

    fn encode(&self, value: &str) -> Result<Option<String>, HashParamError> {
        Ok(Some(encode_uri_encoded(value)))
    }

    fn decode(&self, raw: &str) -> Result<String, HashParamError> {
        decode_uri_encoded(raw)
    }
}

type Subscriber<V> = Rc<dyn Fn(&BindingValue<V>)>;

struct BindingState<C: HashParamCodec> {
    key: String,
    codec: C,
    default: Option<C::Value>,
    current: RefCell<BindingValue<C::Value>>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<C::Value>)>>,
    next_subscriber: Cell<SubscriptionId>,
    generation: Cell<u64>,
}

impl<C: HashParamCodec> BindingState<C> {
    fn derive(&self, hash: &str) -> BindingValue<C::Value> {
        let mut fragment = parse_hash(hash);
        match fragment.params.remove(&self.key) {
            Some(raw) if !(C::EMPTY_IS_ABSENT && raw.is_empty()) => self.codec.decode(&raw).map(Some),
            _ => Ok(self.default.clone().or_else(|| self.codec.absent())),
        }
    }

    fn refresh(&self, hash: &str) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let value = self.derive(hash);
        if let Err(err) = &value {
            warn!(key = %self.key, error = %err, "failed to decode hash param");
        }
        *self.current.borrow_mut() = value.clone();

        // Subscribers may write through the binding, which re-enters refresh
        let subscribers: Vec<Subscriber<C::Value>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(&value);
            // A nested refresh already published a newer value
            if self.generation.get() != generation {
                break;
            }
        }
    }
}

/// A typed view of one hash parameter that follows the live location.
///
/// Dropping the binding removes its host listener.
pub struct HashParamBinding<H: HashHost + 'static, C: HashParamCodec + 'static> {
    location: HashLocation<H>,
    state: Rc<BindingState<C>>,
    listener: ListenerId,
}

impl<H: HashHost + 'static, C: HashParamCodec + 'static> HashParamBinding<H, C> {
    /// Bind to `key` on the host's location.
    ///
    /// `default` is reported whenever the key is absent (or empty, for
    /// codecs that treat empty as absent).
    pub fn new(host: Rc<H>, key: &str, codec: C, default: Option<C::Value>) -> Self {
        let hash = host.read_hash();
        let state = Rc::new(BindingState {
            key: key.to_string(),
            codec,
            default,
            current: RefCell::new(Ok(None)),
            subscribers: RefCell::new(Vec::new()),
            next_subscriber: Cell::new(0),
            generation: Cell::new(0),
        });
        *state.current.borrow_mut() = state.derive(&hash);

        let weak_state: Weak<BindingState<C>> = Rc::downgrade(&state);
        let weak_host: Weak<H> = Rc::downgrade(&host);
        let listener = host.subscribe(Rc::new(move || {
            if let (Some(state), Some(host)) = (weak_state.upgrade(), weak_host.upgrade()) {
                state.refresh(&host.read_hash());
            }
        }));

        Self {
            location: HashLocation::new(host),
            state,
            listener,
        }
    }

    /// The parameter key.
    pub fn key(&self) -> &str {
        &self.state.key
    }

    /// The value derived at the last notification (or at creation).
    pub fn value(&self) -> BindingValue<C::Value> {
        self.state.current.borrow().clone()
    }

    /// Encode and write a value; `None` removes the key.
    ///
    /// Returns whether the hash changed.
    pub fn set(&self, value: Option<&C::Input>, opts: SetHashParamOpts) -> Result<bool, HashParamError> {
        let encoded = match value {
            Some(value) => self.state.codec.encode(value)?,
            None => None,
        };
        Ok(self
            .location
            .set_hash_param(&self.state.key, encoded.as_deref(), opts))
    }

    /// Re-read the hash without waiting for a notification.
    pub fn refresh(&self) {
        self.state.refresh(&self.location.host().read_hash());
    }

    /// Register a callback for every newly derived value.
    pub fn subscribe(&self, subscriber: impl Fn(&BindingValue<C::Value>) + 'static) -> SubscriptionId {
        let id = self.state.next_subscriber.get();
        self.state.next_subscriber.set(id + 1);
        self.state
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(subscriber)));
        id
    }

    /// Remove a callback. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.state
            .subscribers
            .borrow_mut()
            .retain(|(subscriber_id, _)| *subscriber_id != id);
    }
}

impl<H: HashHost + 'static, C: HashParamCodec + 'static> Drop for HashParamBinding<H, C> {
    fn drop(&mut self) {
        self.location.host().unsubscribe(self.listener);
    }
}
