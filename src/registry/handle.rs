//! Observer handles
//!
//! A handle names one observer slot: the topic it lives under and the index
//! it was assigned at registration.

/// Opaque reference to a registered observer
///
/// Returned by every registration call and used to unregister or query that
/// observer. Indices are append-only per topic, so a handle never addresses
/// a different observer while its topic entry exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle<K> {
    topic: K,
    index: usize,
}

impl<K> Handle<K> {
    pub(crate) fn new(topic: K, index: usize) -> Self {
        Self { topic, index }
    }

    /// Topic this observer is registered on
    pub fn topic(&self) -> &K {
        &self.topic
    }

    /// Slot index within the topic
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<K: std::fmt::Display> std::fmt::Display for Handle<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.topic, self.index)
    }
}
