//! # topic-registry
//!
//! An in-process publish/subscribe registry. Callers register observers on a
//! topic, publishers send messages to that topic, and every observer runs
//! synchronously in the order it was registered.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use topic_registry::Registry;
//!
//! let registry: Registry<&str, (i32, i32)> = Registry::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = Rc::clone(&seen);
//! let handle = registry
//!     .register("t", move |_, args: &(i32, i32)| sink.borrow_mut().push(*args))
//!     .unwrap();
//!
//! assert!(registry.publish(&"t", &(1, 2)));
//! assert!(registry.unregister(&handle));
//! assert!(!registry.publish(&"t", &(3, 4)));
//! assert_eq!(*seen.borrow(), vec![(1, 2)]);
//! ```
//!
//! Observer failures (an `Err` return or a panic) are logged through
//! `tracing` and never interrupt delivery to the other observers.

pub mod registry;

pub use registry::{
    Handle, ObserverError, ObserverOutcome, Registry, RegistryConfig, RegistryError, TopicStats,
};
