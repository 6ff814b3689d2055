//! Rate fetch coordinator.
//!
//! Owns the single-in-flight-request rule. Each `fetch_rate` call supersedes
//! the previous one: the earlier task is aborted and, because aborting I/O is
//! best-effort, its outcome is also filtered out by a generation check.
//!
//! ```text
//! Idle -> Fetching -> Completed
//!                  -> Superseded   (a newer fetch_rate started first)
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fx_client::RateClient;
use fx_types::{ConversionRequest, FetchFailure, FetchOutcome, HttpTransport, NetworkMonitor};
use tokio::task::AbortHandle;

use crate::gate::ConnectivityGate;
use crate::parse::parse_rate_response;

/// Identity of the newest fetch. Only the single writer (`begin`) bumps it.
#[derive(Default)]
pub(crate) struct FetchSlot {
    generation: u64,
    task: Option<AbortHandle>,
}

impl FetchSlot {
    /// Starts a new generation, aborting the task of the previous one.
    pub(crate) fn begin(&mut self) -> u64 {
        if let Some(previous) = self.task.take() {
            tracing::debug!(generation = self.generation, "Superseding in-flight fetch");
            previous.abort();
        }
        self.generation += 1;
        self.generation
    }

    pub(crate) fn attach(&mut self, generation: u64, task: AbortHandle) {
        if self.generation == generation {
            self.task = Some(task);
        }
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Marks `generation` finished. Returns false if it was superseded.
    pub(crate) fn complete(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.task = None;
        true
    }

    pub(crate) fn is_fetching(&self) -> bool {
        self.task.is_some()
    }
}

struct Inner<T: HttpTransport, M: NetworkMonitor> {
    client: RateClient<T>,
    gate: ConnectivityGate<M>,
    slot: Mutex<FetchSlot>,
}

impl<T: HttpTransport, M: NetworkMonitor> Inner<T, M> {
    async fn run(&self, req: ConversionRequest) -> FetchOutcome {
        self.gate.await_connectivity().await;
        let body = self.client.fetch(req).await;
        let outcome = parse_rate_response(&body, req.to);
        match &outcome {
            FetchOutcome::Rate(rate) => tracing::debug!(pair = %req, %rate, "Rate fetched"),
            FetchOutcome::Failed(failure) => {
                tracing::warn!(pair = %req, %failure, "Rate fetch failed")
            }
        }
        outcome
    }

    fn lock_slot(&self) -> MutexGuard<'_, FetchSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Coordinates rate lookups so that only the newest one is ever observed.
pub struct RateFetchCoordinator<T: HttpTransport, M: NetworkMonitor> {
    inner: Arc<Inner<T, M>>,
}

impl<T: HttpTransport, M: NetworkMonitor> Clone for RateFetchCoordinator<T, M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: HttpTransport, M: NetworkMonitor> RateFetchCoordinator<T, M> {
    pub fn new(client: RateClient<T>, gate: ConnectivityGate<M>) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                gate,
                slot: Mutex::new(FetchSlot::default()),
            }),
        }
    }

    pub fn client(&self) -> &RateClient<T> {
        &self.inner.client
    }

    pub fn gate(&self) -> &ConnectivityGate<M> {
        &self.inner.gate
    }

    /// True while a fetch is waiting for connectivity or for the server.
    pub fn is_fetching(&self) -> bool {
        self.inner.lock_slot().is_fetching()
    }

    /// Generation of the newest fetch; zero before the first one.
    pub fn generation(&self) -> u64 {
        self.inner.lock_slot().generation
    }

    /// Fetches the rate for `req`.
    ///
    /// Returns `None` when a newer call superseded this one; the caller is
    /// abandoned rather than handed an error. Failures come back as
    /// [`FetchOutcome::Failed`].
    pub async fn fetch_rate(&self, req: ConversionRequest) -> Option<FetchOutcome> {
        self.fetch_rate_with(req, |outcome| outcome).await
    }

    /// Like [`fetch_rate`](Self::fetch_rate), but runs `apply` on the outcome
    /// while no newer fetch can start.
    ///
    /// The generation check and `apply` happen under the same lock that
    /// starting a fetch takes, so a stale outcome can never land after a
    /// newer one.
    pub async fn fetch_rate_with<F, R>(&self, req: ConversionRequest, apply: F) -> Option<R>
    where
        F: FnOnce(FetchOutcome) -> R,
    {
        let (generation, task) = {
            let mut slot = self.inner.lock_slot();
            if slot.is_fetching() {
                // Dropping the old task leaves its HTTP call detached.
                self.inner.client.cancel();
            }
            let generation = slot.begin();
            let inner = Arc::clone(&self.inner);
            let task = tokio::spawn(async move { inner.run(req).await });
            slot.attach(generation, task.abort_handle());
            (generation, task)
        };
        tracing::debug!(pair = %req, generation, "Fetch started");

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => {
                tracing::debug!(pair = %req, generation, "Fetch superseded");
                return None;
            }
            Err(e) => {
                tracing::warn!(pair = %req, generation, error = %e, "Fetch task failed");
                FetchOutcome::Failed(FetchFailure::Transport)
            }
        };

        let mut slot = self.inner.lock_slot();
        if !slot.complete(generation) {
            tracing::debug!(pair = %req, generation, "Discarding stale outcome");
            return None;
        }
        Some(apply(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_generations_increase() {
        let mut slot = FetchSlot::default();
        assert_eq!(slot.begin(), 1);
        assert_eq!(slot.begin(), 2);
        assert!(slot.is_current(2));
        assert!(!slot.is_current(1));
    }

    #[tokio::test]
    async fn test_stale_completion_is_rejected_even_if_task_finished() {
        let mut slot = FetchSlot::default();

        let first = slot.begin();
        let task = tokio::spawn(async {});
        slot.attach(first, task.abort_handle());
        task.await.unwrap();

        // The first task already finished, so the abort below is a no-op;
        // only the generation keeps its result out.
        let second = slot.begin();

        assert!(!slot.complete(first));
        assert!(slot.complete(second));
        assert!(!slot.is_fetching());
    }

    #[tokio::test]
    async fn test_begin_aborts_previous_task() {
        let mut slot = FetchSlot::default();

        let first = slot.begin();
        let task = tokio::spawn(std::future::pending::<()>());
        slot.attach(first, task.abort_handle());
        assert!(slot.is_fetching());

        slot.begin();

        assert!(task.await.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_attach_ignores_stale_generation() {
        let mut slot = FetchSlot::default();
        let first = slot.begin();
        let _second = slot.begin();

        slot.attach(first, tokio::spawn(async {}).abort_handle());

        assert!(!slot.is_fetching());
    }
}
