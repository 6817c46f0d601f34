//! `fidsboard` - Live domestic flight board for Taiwan
//!
//! This library fetches the TDX FIDS flight list (a client-credentials token
//! exchange followed by one flight query) and renders the first rows of the
//! filtered list as an HTML page or a terminal table.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod flight;
pub mod logging;
pub mod lookup;
pub mod render;
pub mod server;
pub mod state;
pub mod tdx;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use filter::{filter_flights, AirportFilter};
pub use flight::FlightRecord;
pub use logging::init_logging;
pub use state::{FetchPhase, Theme, UiState};
pub use tdx::{FlightSource, TdxClient};
