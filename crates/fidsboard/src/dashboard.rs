//! The flight board's state container.
//!
//! A [`Dashboard`] owns the current [`UiState`] snapshot and the
//! [`FlightSource`] used by refresh cycles. User actions and the fetch
//! lifecycle replace the snapshot through the pure transitions on
//! [`UiState`].

use std::sync::Arc;

use chrono::FixedOffset;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::filter::AirportFilter;
use crate::render::time::now_zh_tw;
use crate::state::{Theme, UiState};
use crate::tdx::FlightSource;

/// Shared handle to one board's state. Cheap to clone.
#[derive(Clone)]
pub struct Dashboard {
    source: Arc<dyn FlightSource>,
    state: Arc<RwLock<UiState>>,
    offset: FixedOffset,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("source", &"FlightSource")
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Create a board in the loading phase with no data.
    #[must_use]
    pub fn new(source: Arc<dyn FlightSource>, theme: Theme, offset: FixedOffset) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(UiState::new(theme))),
            offset,
        }
    }

    /// Offset used for displayed times.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> UiState {
        self.state.read().await.clone()
    }

    async fn update<T>(&self, transition: impl FnOnce(UiState) -> (UiState, T)) -> T {
        let mut guard = self.state.write().await;
        let current = std::mem::take(&mut *guard);
        let (next, out) = transition(current);
        *guard = next;
        out
    }

    /// Select an airport filter. No fetch is made.
    pub async fn set_filter(&self, filter: AirportFilter) {
        debug!(%filter, "filter changed");
        self.update(|state| (state.with_filter(filter), ())).await;
    }

    /// Flip the theme. No fetch is made.
    pub async fn toggle_theme(&self) -> Theme {
        self.update(|state| {
            let next = state.with_theme_toggled();
            let theme = next.theme();
            (next, theme)
        })
        .await
    }

    /// Run one refresh cycle: token exchange, then flight query.
    ///
    /// On success the record set and last-updated time are replaced, unless
    /// a newer cycle was started meanwhile. On failure the error is logged
    /// and returned, and the board stays in the loading phase.
    ///
    /// # Errors
    ///
    /// Returns the error of whichever step of the cycle failed.
    pub async fn refresh(&self) -> Result<()> {
        let ticket = self.update(UiState::begin_refresh).await;
        debug!(?ticket, "refresh started");

        let flights = match self.source.fetch_all().await {
            Ok(flights) => flights,
            Err(e) => {
                error!(error = %e, "refresh failed");
                return Err(e);
            }
        };

        let count = flights.len();
        let updated_at = now_zh_tw(self.offset);
        let applied = self
            .update(|state| {
                let current = state.is_current(ticket);
                (state.complete_refresh(ticket, flights, updated_at), current)
            })
            .await;

        if applied {
            info!(count, "flights refreshed");
        } else {
            debug!(?ticket, "discarding superseded refresh");
        }
        Ok(())
    }

    /// Start a refresh cycle in the background.
    ///
    /// Errors are logged by [`Dashboard::refresh`] and otherwise dropped.
    pub fn spawn_refresh(&self) -> JoinHandle<()> {
        let dashboard = self.clone();
        tokio::spawn(async move {
            let _ = dashboard.refresh().await;
        })
    }
}
