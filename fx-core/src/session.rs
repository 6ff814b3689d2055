//! Conversion session.
//!
//! Drives [`ConversionState`] from presentation events: amount edits are
//! applied synchronously, currency selections trigger a rate fetch through
//! the coordinator.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDate};
use fx_types::{
    ConversionRequest, CurrencyCode, FetchFailure, FetchOutcome, HttpTransport, NetworkMonitor,
    Notice, Notifier,
};
use rust_decimal::Decimal;

use crate::conversion::{ConversionState, RateUpdate};
use crate::coordinator::RateFetchCoordinator;

/// What a selection change led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// The new rate is in effect.
    Applied(Decimal),
    /// The fetch failed; the user was notified and the display left as is.
    Failed(FetchFailure),
    /// A newer selection took over before this fetch finished.
    Superseded,
}

pub struct ConversionSession<T: HttpTransport, M: NetworkMonitor> {
    coordinator: RateFetchCoordinator<T, M>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ConversionState>,
}

impl<T: HttpTransport, M: NetworkMonitor> ConversionSession<T, M> {
    pub fn new(coordinator: RateFetchCoordinator<T, M>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_state(coordinator, notifier, ConversionState::default())
    }

    pub fn with_state(
        coordinator: RateFetchCoordinator<T, M>,
        notifier: Arc<dyn Notifier>,
        state: ConversionState,
    ) -> Self {
        Self {
            coordinator,
            notifier,
            state: Mutex::new(state),
        }
    }

    pub fn coordinator(&self) -> &RateFetchCoordinator<T, M> {
        &self.coordinator
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> ConversionState {
        self.lock_state().clone()
    }

    /// Initial fetch for the pair the session starts with.
    pub async fn start(&self) -> Refresh {
        let req = self.lock_state().request();
        self.refresh(req).await
    }

    pub async fn select_from(&self, code: CurrencyCode) -> Refresh {
        let req = self.lock_state().select_from(code);
        self.refresh(req).await
    }

    pub async fn select_to(&self, code: CurrencyCode) -> Refresh {
        let req = self.lock_state().select_to(code);
        self.refresh(req).await
    }

    /// Amount field edited. Never fetches.
    pub fn set_amount_text(&self, text: &str) -> ConversionState {
        let mut state = self.lock_state();
        state.set_amount_text(text);
        state.clone()
    }

    async fn refresh(&self, req: ConversionRequest) -> Refresh {
        let refresh = self
            .coordinator
            .fetch_rate_with(req, |outcome| self.apply(req, outcome, today()))
            .await
            .unwrap_or(Refresh::Superseded);

        match &refresh {
            Refresh::Applied(rate) => tracing::info!(pair = %req, %rate, "Rate applied"),
            Refresh::Failed(_) => self.notifier.notify(Notice::TroubleFetching),
            Refresh::Superseded => {}
        }
        refresh
    }

    fn apply(&self, req: ConversionRequest, outcome: FetchOutcome, on: NaiveDate) -> Refresh {
        let update = self.lock_state().apply_outcome(req, &outcome, on);
        match (update, outcome) {
            (RateUpdate::Applied, FetchOutcome::Rate(rate)) => Refresh::Applied(rate),
            (_, FetchOutcome::Failed(failure)) => Refresh::Failed(failure),
            (RateUpdate::Rejected, FetchOutcome::Rate(_)) => {
                Refresh::Failed(FetchFailure::NonPositiveRate)
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ConversionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
