//! The host environment that owns the live location.
//!
//! A browser window is the usual host: it knows the current URL, can write
//! a new hash with or without a history entry, and notifies listeners when
//! the hash changes. [`HashHost`] captures just that surface so the rest of
//! the crate stays free of global state. [`MemoryHost`] is an in-memory
//! implementation for tests, servers and non-browser front ends.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::trace;
use url::Url;

use crate::error::HashParamError;

/// Identifies a registered hash change listener.
pub type ListenerId = u64;

/// Callback run when the host's hash changes.
pub type HashChangeListener = Rc<dyn Fn()>;

/// Access to a live location with history.
///
/// Hosts are single-threaded. Hash strings passed to the write methods
/// have no leading `#`.
pub trait HashHost {
    /// The full current URL, hash included.
    fn current_url(&self) -> String;

    /// The current hash, with or without its leading `#`.
    fn read_hash(&self) -> String;

    /// Write a new hash and add a history entry. Hosts notify listeners
    /// for this write themselves.
    fn write_hash_push_history(&self, hash: &str);

    /// Write a new hash over the current history entry. Hosts do not
    /// notify listeners for this write.
    fn write_hash_replace_history(&self, hash: &str);

    /// Notify every listener that the hash changed.
    fn emit_hash_change(&self);

    /// Register a listener for hash changes.
    fn subscribe(&self, listener: HashChangeListener) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);
}

/// In-memory host with a linear history and synchronous notifications.
///
/// A written hash that is empty leaves a bare `#` on the URL, as browsers do.
pub struct MemoryHost {
    url: RefCell<Url>,
    history: RefCell<Vec<String>>,
    listeners: RefCell<Vec<(ListenerId, HashChangeListener)>>,
    next_listener: Cell<ListenerId>,
    notifications: Cell<usize>,
}

impl MemoryHost {
    /// Create a host positioned at the given URL.
    pub fn new(url: &str) -> Result<Self, HashParamError> {
        let url = Url::parse(url)?;
        Ok(Self {
            history: RefCell::new(vec![url.to_string()]),
            url: RefCell::new(url),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            notifications: Cell::new(0),
        })
    }

    /// Move to a new URL the way a user or the back button would: a new
    /// history entry followed by a notification.
    pub fn navigate(&self, url: &str) -> Result<(), HashParamError> {
        let url = Url::parse(url)?;
        self.history.borrow_mut().push(url.to_string());
        *self.url.borrow_mut() = url;
        self.emit_hash_change();
        Ok(())
    }

    /// Every history entry, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    /// How many change notifications have been emitted.
    pub fn notification_count(&self) -> usize {
        self.notifications.get()
    }

    /// How many listeners are registered.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn set_hash(&self, hash: &str) -> String {
        let mut url = self.url.borrow_mut();
        url.set_fragment(Some(hash.strip_prefix('#').unwrap_or(hash)));
        url.to_string()
    }
}

impl HashHost for MemoryHost {
    fn current_url(&self) -> String {
        self.url.borrow().to_string()
    }

    fn read_hash(&self) -> String {
        self.url.borrow().fragment().unwrap_or("").to_string()
    }

    fn write_hash_push_history(&self, hash: &str) {
        let href = self.set_hash(hash);
        self.history.borrow_mut().push(href);
        self.emit_hash_change();
    }

    fn write_hash_replace_history(&self, hash: &str) {
        let href = self.set_hash(hash);
        let mut history = self.history.borrow_mut();
        match history.last_mut() {
            Some(last) => *last = href,
            None => history.push(href),
        }
    }

    fn emit_hash_change(&self) {
        self.notifications.set(self.notifications.get() + 1);

        // Listeners may read the host or (un)subscribe while running
        let listeners: Vec<HashChangeListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        trace!(listeners = listeners.len(), "hash change");

        for listener in listeners {
            listener();
        }
    }

    fn subscribe(&self, listener: HashChangeListener) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(listener_id, _)| *listener_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_hash() {
        let host = MemoryHost::new("https://foo.com/app?x=1#view?a=1").unwrap();
        assert_eq!(host.read_hash(), "view?a=1");
        assert_eq!(host.current_url(), "https://foo.com/app?x=1#view?a=1");

        let bare = MemoryHost::new("https://foo.com/").unwrap();
        assert_eq!(bare.read_hash(), "");
    }

    #[test]
    fn test_push_adds_history_and_notifies() {
        let host = MemoryHost::new("https://foo.com/").unwrap();
        host.write_hash_push_history("?a=1");

        assert_eq!(host.current_url(), "https://foo.com/#?a=1");
        assert_eq!(host.history(), vec!["https://foo.com/", "https://foo.com/#?a=1"]);
        assert_eq!(host.notification_count(), 1);
    }

    #[test]
    fn test_replace_keeps_history_length_and_is_silent() {
        let host = MemoryHost::new("https://foo.com/?q=1#?a=1").unwrap();
        host.write_hash_replace_history("?a=2");

        assert_eq!(host.history(), vec!["https://foo.com/?q=1#?a=2"]);
        assert_eq!(host.notification_count(), 0);
    }

    #[test]
    fn test_empty_hash_leaves_bare_marker() {
        let host = MemoryHost::new("https://foo.com/#?a=1").unwrap();
        host.write_hash_replace_history("");
        assert_eq!(host.current_url(), "https://foo.com/#");
        assert_eq!(host.read_hash(), "");
    }

    #[test]
    fn test_listeners() {
        let host = MemoryHost::new("https://foo.com/").unwrap();
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let id = host.subscribe(Rc::new(move || counter.set(counter.get() + 1)));
        assert_eq!(host.listener_count(), 1);

        host.emit_hash_change();
        host.navigate("https://foo.com/#other").unwrap();
        assert_eq!(calls.get(), 2);

        host.unsubscribe(id);
        host.emit_hash_change();
        assert_eq!(calls.get(), 2);
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_listener_can_read_host() {
        let host = Rc::new(MemoryHost::new("https://foo.com/").unwrap());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&host);
        let sink = Rc::clone(&seen);
        host.subscribe(Rc::new(move || {
            if let Some(host) = weak.upgrade() {
                sink.borrow_mut().push(host.read_hash());
            }
        }));

        host.write_hash_push_history("page?k=v");
        assert_eq!(*seen.borrow(), vec!["page?k=v".to_string()]);
    }
}
