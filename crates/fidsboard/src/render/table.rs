//! The five-column flight table shared by the page and the terminal.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::filter::{filter_flights, AirportFilter};
use crate::flight::FlightRecord;
use crate::lookup::{airline_label, airport_label};
use crate::render::time::departure_cell;

/// Maximum number of rows the table ever shows.
pub const MAX_ROWS: usize = 10;

/// Column headings, in display order.
pub const HEADINGS: [&str; 5] = ["航班編號", "航空公司", "出發地", "目的地", "預定起飛時間"];

/// Display text for one flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Flight number as received.
    pub flight_number: String,
    /// `CODE（名稱）` for the airline.
    pub airline: String,
    /// `CODE（名稱）` for the departure airport.
    pub origin: String,
    /// `CODE（名稱）` for the arrival airport.
    pub destination: String,
    /// Localized scheduled departure, or `無資料`.
    pub departure: String,
}

impl TableRow {
    /// Resolve codes and format the departure time of `record`.
    #[must_use]
    pub fn from_record(record: &FlightRecord, offset: FixedOffset) -> Self {
        Self {
            flight_number: record.flight_number.clone(),
            airline: airline_label(&record.airline_id),
            origin: airport_label(&record.departure_airport_id),
            destination: airport_label(&record.arrival_airport_id),
            departure: departure_cell(record.schedule_departure_time.as_deref(), offset),
        }
    }

    /// The cells in column order.
    #[must_use]
    pub fn cells(&self) -> [&str; 5] {
        [
            self.flight_number.as_str(),
            self.airline.as_str(),
            self.origin.as_str(),
            self.destination.as_str(),
            self.departure.as_str(),
        ]
    }
}

/// Rows to display: the first [`MAX_ROWS`] records passing `filter`.
#[must_use]
pub fn visible_rows(
    records: &[FlightRecord],
    filter: &AirportFilter,
    offset: FixedOffset,
) -> Vec<TableRow> {
    filter_flights(records, filter)
        .into_iter()
        .take(MAX_ROWS)
        .map(|record| TableRow::from_record(record, offset))
        .collect()
}
