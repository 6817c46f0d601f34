//! HTTP client for the TDX token and FIDS endpoints.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::flight::FlightRecord;
use crate::tdx::FlightSource;

/// Client id and secret for the client-credentials grant.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Create credentials from an id/secret pair.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// The client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"********")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Talks to TDX: one token exchange and one flight query per cycle.
#[derive(Debug, Clone)]
pub struct TdxClient {
    http: reqwest::Client,
    token_url: String,
    flights_url: String,
    top: u32,
    credentials: Credentials,
}

impl TdxClient {
    /// Create a client for the given endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        token_url: impl Into<String>,
        flights_url: impl Into<String>,
        top: u32,
        timeout: Duration,
        credentials: Credentials,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fidsboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            token_url: token_url.into(),
            flights_url: flights_url.into(),
            top,
            credentials,
        })
    }

    /// Create a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredentials`] if no client id/secret is
    /// configured, or an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.auth.token_url.clone(),
            config.api.flights_url.clone(),
            config.api.top,
            config.request_timeout(),
            config.credentials()?,
        )
    }

    /// Exchange the client credentials for a bearer token.
    ///
    /// A fresh token is requested on every call; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, a body
    /// that is not JSON, or a body without `access_token`.
    pub async fn fetch_token(&self) -> Result<String> {
        debug!(url = %self.token_url, client_id = %self.credentials.client_id, "requesting access token");
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];
        let resp = self.http.post(&self.token_url).form(&form).send().await?;
        let body: TokenResponse = decode("token", resp).await?;
        body.access_token
            .filter(|token| !token.is_empty())
            .ok_or(Error::MissingAccessToken)
    }

    /// Fetch up to `top` flight records using `token`.
    ///
    /// Records are returned as decoded, in upstream order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a
    /// body that is not a JSON array of records.
    pub async fn fetch_flights(&self, token: &str) -> Result<Vec<FlightRecord>> {
        debug!(url = %self.flights_url, top = self.top, "requesting flights");
        let top = self.top.to_string();
        let resp = self
            .http
            .get(&self.flights_url)
            .query(&[("$top", top.as_str()), ("$format", "JSON")])
            .bearer_auth(token)
            .send()
            .await?;
        let flights: Vec<FlightRecord> = decode("flights", resp).await?;
        debug!(count = flights.len(), "received flights");
        Ok(flights)
    }
}

#[async_trait::async_trait]
impl FlightSource for TdxClient {
    async fn fetch_all(&self) -> Result<Vec<FlightRecord>> {
        let token = self.fetch_token().await?;
        self.fetch_flights(&token).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    endpoint: &'static str,
    resp: reqwest::Response,
) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(Error::api(endpoint, status.as_u16(), message));
    }
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
