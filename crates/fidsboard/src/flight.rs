//! Flight records as returned by the TDX FIDS endpoint.

use serde::{Deserialize, Serialize};

/// One row of the upstream FIDS response.
///
/// Field names follow the upstream JSON. Fields the board does not display
/// are ignored, and missing string fields decode as empty strings so that a
/// sparse record still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FlightRecord {
    /// Flight number, e.g. `CI100`.
    pub flight_number: String,

    /// IATA airline code, e.g. `CI`.
    #[serde(rename = "AirlineID")]
    pub airline_id: String,

    /// IATA code of the departure airport.
    #[serde(rename = "DepartureAirportID")]
    pub departure_airport_id: String,

    /// IATA code of the arrival airport.
    #[serde(rename = "ArrivalAirportID")]
    pub arrival_airport_id: String,

    /// Scheduled departure as an ISO 8601 string, absent for some records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_departure_time: Option<String>,
}

impl FlightRecord {
    /// Create a record with the given codes and no scheduled time.
    #[must_use]
    pub fn new(
        flight_number: impl Into<String>,
        airline_id: impl Into<String>,
        departure_airport_id: impl Into<String>,
        arrival_airport_id: impl Into<String>,
    ) -> Self {
        Self {
            flight_number: flight_number.into(),
            airline_id: airline_id.into(),
            departure_airport_id: departure_airport_id.into(),
            arrival_airport_id: arrival_airport_id.into(),
            schedule_departure_time: None,
        }
    }

    /// Set the scheduled departure time.
    #[must_use]
    pub fn with_departure_time(mut self, time: impl Into<String>) -> Self {
        self.schedule_departure_time = Some(time.into());
        self
    }

    /// Whether this flight departs from or arrives at `code`.
    #[must_use]
    pub fn touches_airport(&self, code: &str) -> bool {
        self.departure_airport_id == code || self.arrival_airport_id == code
    }
}
