//! Topic entry and observer slot types
//!
//! This module defines the per-topic state stored in the registry.

use std::cell::Cell;
use std::rc::Rc;

use super::observer::Observer;

/// One registered observer at a fixed index
pub(super) struct ObserverSlot<K, M> {
    /// Index assigned at registration
    pub(super) index: usize,

    /// The observer callback (scope is captured by the closure)
    pub(super) callback: Observer<K, M>,

    /// Cleared when the slot is tombstoned, so in-flight publishes skip it
    live: Cell<bool>,
}

impl<K, M> ObserverSlot<K, M> {
    fn new(index: usize, callback: Observer<K, M>) -> Self {
        Self {
            index,
            callback,
            live: Cell::new(true),
        }
    }

    /// Check whether the slot has not been removed
    pub(super) fn is_live(&self) -> bool {
        self.live.get()
    }

    fn tombstone(&self) {
        self.live.set(false);
    }
}

/// Ordered observer slots for a single topic
///
/// Slots are never reordered or compacted. A removed slot stays behind as a
/// `None` tombstone so that every other handle keeps addressing its own slot.
pub(super) struct TopicEntry<K, M> {
    slots: Vec<Option<Rc<ObserverSlot<K, M>>>>,

    /// Number of non-tombstoned slots
    live: usize,
}

impl<K, M> TopicEntry<K, M> {
    /// Create an empty topic entry
    pub(super) fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Append an observer and return its index
    pub(super) fn push(&mut self, callback: Observer<K, M>) -> usize {
        let index = self.slots.len();
        self.slots
            .push(Some(Rc::new(ObserverSlot::new(index, callback))));
        self.live += 1;
        index
    }

    /// Tombstone the slot at `index`, returning it if it was live
    pub(super) fn remove(&mut self, index: usize) -> Option<Rc<ObserverSlot<K, M>>> {
        let slot = self.slots.get_mut(index)?.take()?;
        slot.tombstone();
        self.live -= 1;
        Some(slot)
    }

    /// Tombstone every slot, used when the whole topic is dropped
    pub(super) fn tombstone_all(&self) {
        for slot in self.slots.iter().flatten() {
            slot.tombstone();
        }
    }

    /// Check whether `index` addresses a live slot
    pub(super) fn is_live(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// Number of live observers
    pub(super) fn live_count(&self) -> usize {
        self.live
    }

    /// True once every slot has been tombstoned
    pub(super) fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live slots at this moment, in index order
    pub(super) fn snapshot(&self) -> Vec<Rc<ObserverSlot<K, M>>> {
        self.slots.iter().flatten().cloned().collect()
    }

    /// Slot statistics
    pub(super) fn stats(&self) -> TopicStats {
        TopicStats {
            live_observers: self.live,
            slots: self.slots.len(),
            tombstones: self.slots.len() - self.live,
        }
    }
}

/// Statistics for a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicStats {
    /// Number of live observers
    pub live_observers: usize,
    /// Total slots ever allocated (next index to be assigned)
    pub slots: usize,
    /// Slots emptied by removal
    pub tombstones: usize,
}
