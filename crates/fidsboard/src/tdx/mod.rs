//! Access to the TDX (Transport Data eXchange) flight API.
//!
//! A refresh cycle is a client-credentials token exchange followed by one
//! authenticated FIDS query. [`FlightSource`] abstracts the cycle so the
//! dashboard can run against something other than the live API.

mod client;

pub use client::{Credentials, TdxClient};

use crate::error::Result;
use crate::flight::FlightRecord;

/// Default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str =
    "https://tdx.transportdata.tw/auth/realms/TDXConnect/protocol/openid-connect/token";

/// Default FIDS flight endpoint.
pub const DEFAULT_FLIGHTS_URL: &str = "https://tdx.transportdata.tw/api/basic/v2/Air/FIDS/Flight";

/// Largest number of records one cycle asks for.
pub const MAX_TOP: u32 = 100;

/// Something that can run one full fetch cycle.
#[async_trait::async_trait]
pub trait FlightSource: Send + Sync {
    /// Fetch the current flight list, credentials first, then data.
    ///
    /// # Errors
    ///
    /// Returns an error if either step fails. Nothing is retried.
    async fn fetch_all(&self) -> Result<Vec<FlightRecord>>;
}
