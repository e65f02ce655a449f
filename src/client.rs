/*
 *  client.rs
 *
 *  inkcast - e-paper weather board
 *  (c) 2025-26 Stuart Hunter
 *
 *  Forecast fetch: one GET per wake cycle against the locationforecast
 *  compact endpoint.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, header};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const FORECAST_URL: &str = "https://api.met.no/weatherapi/locationforecast/2.0/compact";

// The upstream requires an identifying User-Agent.
const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (jesse@krets.com)"
);

#[derive(Debug, Error)]
pub enum FetchError {
    /// No network, DNS failure, connect/read timeout. The cycle renders
    /// the connection-failed notice for these.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("payload undecodable: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Transport failures get the connection-failed screen; everything
    /// else means the fetch worked but the data did not.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

/// An unparsed fetch result: the JSON body plus the raw HTTP `Date`
/// header, kept as the freshness-stamp fallback.
#[derive(Debug, Clone)]
pub struct RawForecast {
    pub payload: Value,
    pub fetched_at: Option<String>,
}

/// Capability seam for the forecast transport.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<RawForecast, FetchError>;
}

/// The real thing, over HTTPS.
#[derive(Debug)]
pub struct HttpForecastSource {
    client: Client,
    base_url: String,
}

impl HttpForecastSource {
    pub fn new() -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static(USER_AGENT));
        headers.insert("Accept", header::HeaderValue::from_static("application/json"));
        headers.insert("Connection", header::HeaderValue::from_static("close"));

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: FORECAST_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let mut source = Self::new()?;
        source.base_url = base_url.into();
        Ok(source)
    }
}

#[async_trait]
impl ForecastSource for HttpForecastSource {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<RawForecast, FetchError> {
        info!("fetching forecast for {:.4}, {:.4}", lat, lon);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("lat", lat), ("lon", lon)])
            .send()
            .await?;

        let fetched_at = response
            .headers()
            .get(header::DATE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&body)?;

        debug!("forecast received, {} bytes", body.len());
        Ok(RawForecast { payload, fetched_at })
    }
}
