//! Cancel-by-tag registry of in-flight calls.
//!
//! Each logical request stream is identified by a tag. Starting a call under a
//! tag atomically replaces the registered handle and aborts the previous one,
//! so at most one call per tag is ever running.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::task::{AbortHandle, JoinHandle};

struct ActiveCall {
    id: u64,
    handle: AbortHandle,
}

/// Registry mapping a stream tag to its currently active call.
#[derive(Default)]
pub struct CallRegistry {
    calls: DashMap<String, ActiveCall>,
    next_id: AtomicU64,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `call` under `tag`, aborting whatever was registered there.
    ///
    /// Returns the call id (for [`CallRegistry::finish`]) and the task handle.
    pub fn start<F>(&self, tag: &str, call: F) -> (u64, JoinHandle<F::Output>)
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        // The shard lock is held from abort to insert.
        let entry = self.calls.entry(tag.to_owned());
        if let Entry::Occupied(previous) = &entry {
            tracing::debug!(tag, call_id = previous.get().id, "Cancelling earlier call");
            previous.get().handle.abort();
        }
        let task = tokio::spawn(call);
        entry.insert(ActiveCall {
            id,
            handle: task.abort_handle(),
        });

        (id, task)
    }

    /// Unregisters call `id` unless a newer call has already replaced it.
    pub fn finish(&self, tag: &str, id: u64) {
        self.calls.remove_if(tag, |_, call| call.id == id);
    }

    /// Aborts and unregisters whatever runs under `tag`.
    pub fn cancel(&self, tag: &str) -> bool {
        match self.calls.remove(tag) {
            Some((_, call)) => {
                call.handle.abort();
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self, tag: &str) -> bool {
        self.calls.contains_key(tag)
    }
}
