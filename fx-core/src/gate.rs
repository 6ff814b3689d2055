//! Connectivity gate.
//!
//! Blocks a fetch until the device is reachable again. Reachability is polled
//! at a fixed interval; there is no upper bound on how long the wait may take.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use fx_types::{ConnectivityEpisode, NetworkMonitor, Notice, Notifier};

/// Delay between reachability checks while offline.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Waits for connectivity and raises one "no internet" notice per offline episode.
pub struct ConnectivityGate<M: NetworkMonitor> {
    monitor: M,
    notifier: Arc<dyn Notifier>,
    poll_interval: Duration,
    episode: Mutex<Option<ConnectivityEpisode>>,
}

impl<M: NetworkMonitor> ConnectivityGate<M> {
    pub fn new(monitor: M, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            monitor,
            notifier,
            poll_interval: DEFAULT_POLL_INTERVAL,
            episode: Mutex::new(None),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn monitor(&self) -> &M {
        &self.monitor
    }

    /// The offline episode in progress, if the last check found no network.
    pub fn current_episode(&self) -> Option<ConnectivityEpisode> {
        self.episode
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns once the device is reachable.
    ///
    /// Returns immediately when already online. Otherwise notifies (once per
    /// episode) and polls until a reachable transport shows up.
    pub async fn await_connectivity(&self) {
        if self.monitor.is_reachable().await {
            self.end_episode();
            return;
        }

        self.enter_offline();
        loop {
            tokio::time::sleep(self.poll_interval).await;
            if self.monitor.is_reachable().await {
                self.end_episode();
                return;
            }
            tracing::trace!("Still offline, waiting for a connection");
        }
    }

    fn enter_offline(&self) {
        let first_notice = {
            let mut episode = self.episode.lock().unwrap_or_else(PoisonError::into_inner);
            let episode = episode.get_or_insert_with(|| {
                tracing::info!("Device went offline");
                ConnectivityEpisode::begin()
            });
            episode.mark_notified()
        };

        if first_notice {
            self.notifier.notify(Notice::NoInternet);
        }
    }

    fn end_episode(&self) {
        let ended = self
            .episode
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(episode) = ended {
            let offline_for = Utc::now() - episode.started_at;
            tracing::info!(
                offline_secs = offline_for.num_seconds(),
                "Connection is back"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use fx_types::Transport;

    struct SwitchMonitor {
        online: AtomicBool,
        checks: AtomicUsize,
    }

    impl SwitchMonitor {
        fn new(online: bool) -> Self {
            Self {
                online: AtomicBool::new(online),
                checks: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl NetworkMonitor for SwitchMonitor {
        async fn active_transports(&self) -> Vec<Transport> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            if self.online.load(Ordering::SeqCst) {
                vec![Transport::Cellular]
            } else {
                vec![Transport::Other]
            }
        }
    }

    #[derive(Default)]
    struct CountingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl Notifier for CountingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    fn gate(online: bool) -> (Arc<ConnectivityGate<SwitchMonitor>>, Arc<CountingNotifier>) {
        let notifier = Arc::new(CountingNotifier::default());
        let gate = ConnectivityGate::new(SwitchMonitor::new(online), notifier.clone());
        (Arc::new(gate), notifier)
    }

    #[tokio::test(start_paused = true)]
    async fn test_online_returns_immediately_without_notice() {
        let (gate, notifier) = gate(true);

        gate.await_connectivity().await;

        assert!(notifier.notices.lock().unwrap().is_empty());
        assert_eq!(gate.monitor().checks.load(Ordering::SeqCst), 1);
        assert!(gate.current_episode().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_notice_per_episode_regardless_of_polls() {
        let (gate, notifier) = gate(false);

        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.await_connectivity().await }
        });

        // Initial check plus polls at 3, 6, 9, 12, 15, 18 seconds.
        tokio::time::sleep(Duration::from_secs(19)).await;
        assert!(!waiter.is_finished());
        assert_eq!(notifier.notices.lock().unwrap().as_slice(), &[Notice::NoInternet]);
        assert_eq!(gate.monitor().checks.load(Ordering::SeqCst), 7);
        assert!(gate.current_episode().unwrap().notified);

        gate.monitor().online.store(true, Ordering::SeqCst);
        waiter.await.unwrap();

        assert_eq!(notifier.notices.lock().unwrap().len(), 1);
        assert!(gate.current_episode().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_episode_notifies_again() {
        let (gate, notifier) = gate(false);

        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.await_connectivity().await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        gate.monitor().online.store(true, Ordering::SeqCst);
        waiter.await.unwrap();

        gate.monitor().online.store(false, Ordering::SeqCst);
        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.await_connectivity().await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        gate.monitor().online.store(true, Ordering::SeqCst);
        waiter.await.unwrap();

        assert_eq!(
            notifier.notices.lock().unwrap().as_slice(),
            &[Notice::NoInternet, Notice::NoInternet]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_waiter_keeps_episode_notified() {
        let (gate, notifier) = gate(false);

        let first = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.await_connectivity().await }
        });
        tokio::time::sleep(Duration::from_secs(4)).await;
        first.abort();

        let second = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.await_connectivity().await }
        });
        tokio::time::sleep(Duration::from_secs(4)).await;
        gate.monitor().online.store(true, Ordering::SeqCst);
        second.await.unwrap();

        assert_eq!(notifier.notices.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_poll_interval() {
        let notifier = Arc::new(CountingNotifier::default());
        let gate = Arc::new(
            ConnectivityGate::new(SwitchMonitor::new(false), notifier)
                .with_poll_interval(Duration::from_millis(500)),
        );

        let waiter = tokio::spawn({
            let gate = Arc::clone(&gate);
            async move { gate.await_connectivity().await }
        });
        tokio::time::sleep(Duration::from_millis(2100)).await;
        gate.monitor().online.store(true, Ordering::SeqCst);
        waiter.await.unwrap();

        // Initial check, 4 offline polls by 2.1s, then the one that sees the link.
        assert_eq!(gate.monitor().checks.load(Ordering::SeqCst), 6);
    }
}
