//! Channel bridge for async consumers
//!
//! Observers run synchronously inside `publish`. A consumer living in an
//! async task can instead take a receiver: every message published on the
//! topic is cloned into an unbounded tokio channel.

use std::fmt::Debug;
use std::hash::Hash;

use tokio::sync::mpsc;

use super::error::RegistryError;
use super::handle::Handle;
use super::store::Registry;

impl<K, M> Registry<K, M>
where
    K: Eq + Hash + Clone + Debug + 'static,
    M: Clone + 'static,
{
    /// Subscribe a channel to a topic
    ///
    /// Returns the forwarding observer's handle and the receiving end. Once
    /// the receiver is dropped, the observer unregisters itself on the next
    /// publish.
    pub fn channel(
        &self,
        topic: K,
    ) -> Result<(Handle<K>, mpsc::UnboundedReceiver<M>), RegistryError> {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = self.register_with_handle(topic, move |own, registry, message: &M| {
            if tx.send(message.clone()).is_err() {
                registry.unregister(own);
                tracing::debug!(handle = ?own, "Channel receiver dropped, observer removed");
            }
        })?;

        Ok((handle, rx))
    }
}
