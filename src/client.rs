use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::constants::{UNITS, USER_AGENT};
use crate::error::{Error, Result};
use crate::models::{Coordinates, GeocodeResponse, RawForecastResponse};

/// HTTP client for the upstream forecast API.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Arc<Client>,
    config: ApiConfig,
}

impl WeatherApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Issues `GET {base}/forecast` with `params` plus the API key and
    /// deserializes the JSON body.
    async fn make_request<T: DeserializeOwned>(&self, params: &[(&str, String)]) -> Result<T> {
        let url = self.config.endpoint("forecast");
        // The key is appended separately so it never reaches the logs.
        tracing::debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!("Request failed with status: {}", status)));
        }

        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes from {}", body.len(), url);
        serde_json::from_slice(&body)
            .map_err(|e| Error::InvalidResponse(format!("malformed JSON body: {}", e)))
    }

    /// Looks up a free-text city name and returns the first match's position.
    pub async fn resolve_coordinates(&self, city: &str) -> Result<Coordinates> {
        tracing::info!("Resolving coordinates for {}", city);

        let data: GeocodeResponse = self.make_request(&[("q", city.to_string())]).await?;
        let coord = data
            .city
            .and_then(|c| c.coord)
            .ok_or_else(|| Error::InvalidResponse(format!("missing city coordinates for {}", city)))?;

        match (coord.lat, coord.lon) {
            (Some(lat), Some(long)) => Ok(Coordinates { lat, long }),
            _ => Err(Error::InvalidResponse(format!(
                "incomplete city coordinates for {}",
                city
            ))),
        }
    }

    /// Retrieves the multi-day forecast for `coords` in imperial units.
    pub async fn fetch_forecast(&self, coords: Coordinates) -> Result<RawForecastResponse> {
        tracing::info!("Fetching forecast for coordinates: {}, {}", coords.lat, coords.long);

        self.make_request(&[
            ("lat", coords.lat.to_string()),
            ("lon", coords.long.to_string()),
            ("units", UNITS.to_string()),
        ])
        .await
    }
}
