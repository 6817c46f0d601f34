//! Airport filter for the flight table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::flight::FlightRecord;

/// Value of the "all airports" option.
pub const ALL: &str = "all";

/// Dropdown label for the "all airports" option.
pub const ALL_LABEL: &str = "全部";

/// The airport selected in the dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AirportFilter {
    /// Show every flight.
    #[default]
    All,
    /// Show flights departing from or arriving at this airport code.
    Airport(String),
}

impl AirportFilter {
    /// Filter on a single airport code.
    #[must_use]
    pub fn airport(code: impl Into<String>) -> Self {
        Self::Airport(code.into().trim().to_ascii_uppercase())
    }

    /// Whether `record` passes this filter.
    #[must_use]
    pub fn matches(&self, record: &FlightRecord) -> bool {
        match self {
            Self::All => true,
            Self::Airport(code) => record.touches_airport(code),
        }
    }

    /// The form value for this filter (`all` or the airport code).
    #[must_use]
    pub fn as_value(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Airport(code) => code,
        }
    }
}

impl fmt::Display for AirportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_value())
    }
}

/// Error for a filter value that is neither `all` nor an airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport filter: {0:?}")]
pub struct ParseFilterError(String);

impl FromStr for AirportFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(ParseFilterError(s.to_string()));
        }
        if value.eq_ignore_ascii_case(ALL) || value == ALL_LABEL {
            return Ok(Self::All);
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ParseFilterError(s.to_string()));
        }
        Ok(Self::airport(value))
    }
}

impl TryFrom<String> for AirportFilter {
    type Error = ParseFilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AirportFilter> for String {
    fn from(filter: AirportFilter) -> Self {
        filter.as_value().to_string()
    }
}

/// Records that pass `filter`, in fetch order.
#[must_use]
pub fn filter_flights<'a>(records: &'a [FlightRecord], filter: &AirportFilter) -> Vec<&'a FlightRecord> {
    records.iter().filter(|record| filter.matches(record)).collect()
}
