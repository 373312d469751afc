//! Topic registry for in-process pub/sub
//!
//! The registry maps each topic to an ordered list of observer slots and
//! invokes every live observer, synchronously and in registration order,
//! when a message is published to that topic.
//!
//! # Architecture
//!
//! ```text
//!                          Registry<K, M>
//!                  ┌──────────────────────────────┐
//!                  │ topics: HashMap<K,           │
//!                  │   TopicEntry {               │
//!                  │     slots: [Some, None, ..], │
//!                  │     live,                    │
//!                  │   }                          │
//!                  │ >                            │
//!                  └──────────────┬───────────────┘
//!                                 │ publish(topic, &msg)
//!         ┌───────────────────────┼───────────────────────┐
//!         │                       │                       │
//!         ▼                       ▼                       ▼
//!    [slot 0]                [slot 1]                [slot 2]
//!    callback(&msg)          tombstone (skipped)     callback(&msg)
//! ```
//!
//! # Stable Handles
//!
//! A [`Handle`] is the pair `(topic, index)`. Removing an observer leaves a
//! tombstone at its index instead of shifting later slots, so every other
//! handle stays valid. The topic entry itself is dropped as soon as its last
//! live observer goes away.
//!
//! # Re-entrancy
//!
//! `publish` iterates over a snapshot of the slots taken when it starts and
//! checks each slot is still live right before invoking it. Observers can
//! register, unregister, or publish from inside their callback.

pub mod channel;
pub mod config;
pub mod entry;
pub mod error;
pub mod handle;
pub mod observer;
pub mod store;

pub use config::RegistryConfig;
pub use entry::TopicStats;
pub use error::{ObserverError, RegistryError};
pub use handle::Handle;
pub use observer::ObserverOutcome;
pub use store::Registry;
