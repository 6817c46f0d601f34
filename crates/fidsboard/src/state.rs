//! UI state for the flight board.
//!
//! [`UiState`] is a snapshot. Every transition consumes the current snapshot
//! and returns the next one; nothing mutates a snapshot in place.

use serde::{Deserialize, Serialize};

use crate::filter::AirportFilter;
use crate::flight::FlightRecord;

/// Colour theme of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light text on a black background.
    #[default]
    Dark,
    /// Dark text on a white background.
    Light,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

/// Where the fetch lifecycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPhase {
    /// A refresh cycle has started and not yet completed.
    #[default]
    Loading,
    /// The most recent refresh cycle completed.
    Loaded,
}

/// Identifies one refresh cycle.
///
/// Only the completion carrying the ticket of the most recently started
/// cycle is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

/// A snapshot of everything the page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    filter: AirportFilter,
    theme: Theme,
    phase: FetchPhase,
    last_updated: Option<String>,
    flights: Vec<FlightRecord>,
    generation: u64,
}

impl UiState {
    /// Initial state: loading, no data, the given theme.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Currently selected airport filter.
    #[must_use]
    pub fn filter(&self) -> &AirportFilter {
        &self.filter
    }

    /// Current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Current fetch phase.
    #[must_use]
    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Whether a refresh is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    /// Locale-formatted time of the last successful refresh.
    #[must_use]
    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    /// Records from the most recent successful refresh, in fetch order.
    #[must_use]
    pub fn flights(&self) -> &[FlightRecord] {
        &self.flights
    }

    /// Select a different airport filter. Records are untouched.
    #[must_use]
    pub fn with_filter(self, filter: AirportFilter) -> Self {
        Self { filter, ..self }
    }

    /// Flip the theme. Records and phase are untouched.
    #[must_use]
    pub fn with_theme_toggled(self) -> Self {
        let theme = self.theme.toggled();
        Self { theme, ..self }
    }

    /// Enter the loading phase for a new refresh cycle.
    #[must_use]
    pub fn begin_refresh(self) -> (Self, RefreshTicket) {
        let generation = self.generation + 1;
        let next = Self {
            phase: FetchPhase::Loading,
            generation,
            ..self
        };
        (next, RefreshTicket(generation))
    }

    /// Whether `ticket` belongs to the most recently started cycle.
    #[must_use]
    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Replace the record set with the result of the cycle `ticket`.
    ///
    /// A completion from a superseded cycle returns the state unchanged.
    #[must_use]
    pub fn complete_refresh(
        self,
        ticket: RefreshTicket,
        flights: Vec<FlightRecord>,
        updated_at: String,
    ) -> Self {
        if !self.is_current(ticket) {
            return self;
        }
        Self {
            phase: FetchPhase::Loaded,
            last_updated: Some(updated_at),
            flights,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: &str) -> FlightRecord {
        FlightRecord::new(number, "CI", "TPE", "KHH")
    }

    #[test]
    fn test_initial_state() {
        let state = UiState::new(Theme::Dark);
        assert!(state.is_loading());
        assert_eq!(state.filter(), &AirportFilter::All);
        assert_eq!(state.theme(), Theme::Dark);
        assert!(state.last_updated().is_none());
        assert!(state.flights().is_empty());
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_refresh_lifecycle() {
        let (state, ticket) = UiState::new(Theme::Dark).begin_refresh();
        assert!(state.is_loading());
        let state = state.complete_refresh(ticket, vec![record("CI100")], "now".to_string());
        assert_eq!(state.phase(), FetchPhase::Loaded);
        assert_eq!(state.last_updated(), Some("now"));
        assert_eq!(state.flights().len(), 1);

        let (state, _) = state.begin_refresh();
        assert!(state.is_loading());
        // Previous data stays until the new cycle completes
        assert_eq!(state.flights().len(), 1);
    }

    #[test]
    fn test_refresh_replaces_records() {
        let (state, first) = UiState::default().begin_refresh();
        let state = state.complete_refresh(first, vec![record("A"), record("B")], "t1".into());
        let (state, second) = state.begin_refresh();
        let state = state.complete_refresh(second, vec![record("C")], "t2".into());
        let numbers: Vec<&str> = state.flights().iter().map(|r| r.flight_number.as_str()).collect();
        assert_eq!(numbers, vec!["C"]);
        assert_eq!(state.last_updated(), Some("t2"));
    }

    #[test]
    fn test_superseded_completion_is_ignored() {
        let (state, first) = UiState::default().begin_refresh();
        let (state, second) = state.begin_refresh();
        assert!(!state.is_current(first));

        let state = state.complete_refresh(first, vec![record("OLD")], "t1".into());
        assert!(state.is_loading());
        assert!(state.flights().is_empty());

        let state = state.complete_refresh(second, vec![record("NEW")], "t2".into());
        assert_eq!(state.flights()[0].flight_number, "NEW");
    }

    #[test]
    fn test_filter_and_theme_keep_records() {
        let (state, ticket) = UiState::default().begin_refresh();
        let state = state.complete_refresh(ticket, vec![record("CI100")], "t".into());
        let before = state.flights().to_vec();

        let state = state
            .with_filter(AirportFilter::airport("TSA"))
            .with_theme_toggled();
        assert_eq!(state.flights(), before.as_slice());
        assert_eq!(state.phase(), FetchPhase::Loaded);
        assert_eq!(state.theme(), Theme::Light);
        assert_eq!(state.filter().as_value(), "TSA");
    }

    #[test]
    fn test_theme_serde() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
    }
}
