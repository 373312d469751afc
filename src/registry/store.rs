//! Observer registry implementation
//!
//! The central registry that owns every topic and fans published messages
//! out to that topic's observers.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use super::config::RegistryConfig;
use super::entry::{TopicEntry, TopicStats};
use super::error::{ObserverError, RegistryError};
use super::handle::Handle;
use super::observer::{Observer, ObserverOutcome};

/// Publish/subscribe registry for a single thread
///
/// Topics are keyed by `K`; observers receive a `&M` message on every
/// publish. All methods take `&self`, so observers may call back into the
/// registry (register, unregister, or publish again) while a publish is in
/// progress. No borrow of the topic map is held while an observer runs.
pub struct Registry<K, M> {
    /// Map of topic key to its observer slots
    topics: RefCell<HashMap<K, TopicEntry<K, M>>>,

    /// Configuration
    config: RegistryConfig,
}

impl<K, M> Registry<K, M>
where
    K: Eq + Hash + Clone + Debug + 'static,
    M: 'static,
{
    /// Create a new registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a new registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            topics: RefCell::new(HashMap::new()),
            config,
        }
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register an observer on a topic
    ///
    /// The topic is created on first use. Returns the handle that identifies
    /// this observer, or an error if the topic is at its configured limit.
    pub fn register<F, R>(&self, topic: K, callback: F) -> Result<Handle<K>, RegistryError>
    where
        F: Fn(&Self, &M) -> R + 'static,
        R: ObserverOutcome,
    {
        let observer: Observer<K, M> =
            Rc::new(move |registry: &Self, message: &M| callback(registry, message).into_outcome());
        self.insert(topic, observer)
    }

    /// Register an observer that runs with `scope` as its context
    pub fn register_scoped<S, F, R>(
        &self,
        topic: K,
        scope: S,
        callback: F,
    ) -> Result<Handle<K>, RegistryError>
    where
        S: 'static,
        F: Fn(&S, &Self, &M) -> R + 'static,
        R: ObserverOutcome,
    {
        self.register(topic, move |registry, message| {
            callback(&scope, registry, message)
        })
    }

    /// Register an observer that runs on the next publish only
    ///
    /// The observer removes itself before its callback runs, so a publish
    /// issued from inside the callback cannot reach it a second time.
    pub fn register_once<F, R>(&self, topic: K, callback: F) -> Result<Handle<K>, RegistryError>
    where
        F: Fn(&Self, &M) -> R + 'static,
        R: ObserverOutcome,
    {
        self.register_with_handle(topic, move |own, registry, message| {
            registry.unregister(own);
            callback(registry, message).into_outcome()
        })
    }

    /// Register a run-once observer with `scope` as its context
    pub fn register_once_scoped<S, F, R>(
        &self,
        topic: K,
        scope: S,
        callback: F,
    ) -> Result<Handle<K>, RegistryError>
    where
        S: 'static,
        F: Fn(&S, &Self, &M) -> R + 'static,
        R: ObserverOutcome,
    {
        self.register_once(topic, move |registry, message| {
            callback(&scope, registry, message)
        })
    }

    /// Register an observer whose callback also receives its own handle
    pub(super) fn register_with_handle<F, R>(
        &self,
        topic: K,
        callback: F,
    ) -> Result<Handle<K>, RegistryError>
    where
        F: Fn(&Handle<K>, &Self, &M) -> R + 'static,
        R: ObserverOutcome,
    {
        let cell: Rc<OnceCell<Handle<K>>> = Rc::new(OnceCell::new());
        let own = Rc::clone(&cell);

        let handle = self.register(topic, move |registry, message| match own.get() {
            Some(handle) => callback(handle, registry, message).into_outcome(),
            None => Ok(()),
        })?;

        // Nothing can publish between the insert above and this point
        let _ = cell.set(handle.clone());
        Ok(handle)
    }

    fn insert(&self, topic: K, observer: Observer<K, M>) -> Result<Handle<K>, RegistryError> {
        let mut topics = self.topics.borrow_mut();

        let live = topics.get(&topic).map_or(0, TopicEntry::live_count);
        if !self.config.admits(live) {
            tracing::warn!(
                topic = ?topic,
                limit = self.config.max_observers_per_topic,
                "Observer rejected: limit reached"
            );
            return Err(RegistryError::ObserverLimitReached {
                topic: format!("{:?}", topic),
                limit: self.config.max_observers_per_topic,
            });
        }

        let entry = topics.entry(topic.clone()).or_insert_with(TopicEntry::new);
        let index = entry.push(observer);

        if self.config.log_registrations {
            tracing::debug!(
                topic = ?topic,
                index = index,
                observers = entry.live_count(),
                "Observer registered"
            );
        }

        Ok(Handle::new(topic, index))
    }

    /// Remove an observer
    ///
    /// Returns false if the handle is not live (already removed, unknown
    /// topic, or out-of-range index). The topic is dropped once its last
    /// live observer is removed.
    pub fn unregister(&self, handle: &Handle<K>) -> bool {
        let removed = {
            let mut topics = self.topics.borrow_mut();

            let Some(entry) = topics.get_mut(handle.topic()) else {
                return false;
            };
            let Some(slot) = entry.remove(handle.index()) else {
                return false;
            };

            let remaining = entry.live_count();
            if entry.is_empty() {
                topics.remove(handle.topic());
            }

            if self.config.log_registrations {
                tracing::debug!(
                    topic = ?handle.topic(),
                    index = handle.index(),
                    observers = remaining,
                    "Observer removed"
                );
            }

            slot
        };

        // Drop the callback (and whatever it captured) outside the borrow
        drop(removed);
        true
    }

    /// Publish a message to every live observer of a topic
    ///
    /// Observers run in registration order over the slots that existed when
    /// the call started. Observers added during the call are not invoked;
    /// observers removed during the call are skipped. A failing or panicking
    /// observer is logged and does not stop delivery to the rest.
    ///
    /// Returns false if the topic has no observers.
    pub fn publish(&self, topic: &K, message: &M) -> bool {
        let snapshot = match self.topics.borrow().get(topic) {
            Some(entry) => entry.snapshot(),
            None => return false,
        };

        for slot in snapshot {
            if !slot.is_live() {
                continue;
            }

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (slot.callback)(self, message)))
                .unwrap_or_else(|payload| Err(ObserverError::from_panic(payload)));

            if let Err(err) = outcome {
                tracing::error!(
                    topic = ?topic,
                    index = slot.index,
                    error = %err,
                    "Observer failed while publishing"
                );
            }
        }

        true
    }

    /// Check whether a handle still refers to a live observer
    pub fn has_observer(&self, handle: &Handle<K>) -> bool {
        self.topics
            .borrow()
            .get(handle.topic())
            .is_some_and(|entry| entry.is_live(handle.index()))
    }

    /// Check whether a topic has any observers
    pub fn has_topic(&self, topic: &K) -> bool {
        self.topics.borrow().contains_key(topic)
    }

    /// Remove all observers of one topic, or of every topic when `None`
    ///
    /// A publish in progress on an affected topic stops delivering to the
    /// removed observers. Always returns true.
    pub fn unregister_all(&self, topic: Option<&K>) -> bool {
        match topic {
            Some(topic) => {
                let removed = self.topics.borrow_mut().remove(topic);
                if let Some(entry) = removed {
                    entry.tombstone_all();
                    tracing::debug!(
                        topic = ?topic,
                        observers = entry.live_count(),
                        "Topic cleared"
                    );
                }
            }
            None => {
                let removed = std::mem::take(&mut *self.topics.borrow_mut());
                for entry in removed.values() {
                    entry.tombstone_all();
                }
                tracing::debug!(topics = removed.len(), "Registry cleared");
            }
        }

        true
    }

    /// Get total number of topics
    pub fn topic_count(&self) -> usize {
        self.topics.borrow().len()
    }

    /// Get the number of live observers on a topic
    pub fn observer_count(&self, topic: &K) -> usize {
        self.topics
            .borrow()
            .get(topic)
            .map_or(0, TopicEntry::live_count)
    }

    /// Get topic statistics
    pub fn topic_stats(&self, topic: &K) -> Option<TopicStats> {
        self.topics.borrow().get(topic).map(TopicEntry::stats)
    }
}

impl<K, M> Default for Registry<K, M>
where
    K: Eq + Hash + Clone + Debug + 'static,
    M: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
