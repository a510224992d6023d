//! Composed weather lookup: coordinates, forecast fetch, current conditions
//! and the daily forecast window.

use std::fmt;

use tokio_util::sync::CancellationToken;

use crate::client::WeatherApiClient;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::models::WeatherRecord;
use crate::normalize::{build_forecast_window, extract_current};

/// Stage of a lookup, logged on entry and again if it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    ResolvingCoords,
    FetchingForecast,
    ExtractingCurrent,
    BuildingForecast,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupStage::ResolvingCoords => "resolving coordinates",
            LookupStage::FetchingForecast => "fetching forecast",
            LookupStage::ExtractingCurrent => "extracting current conditions",
            LookupStage::BuildingForecast => "building forecast",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct WeatherService {
    client: WeatherApiClient,
}

impl WeatherService {
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::with_client(WeatherApiClient::new(config)?))
    }

    pub fn with_client(client: WeatherApiClient) -> Self {
        Self { client }
    }

    /// Returns the current conditions followed by up to five daily
    /// forecasts. Any failing stage aborts the whole lookup.
    pub async fn get_weather_for_city(&self, city: &str) -> Result<Vec<WeatherRecord>> {
        tracing::info!("Getting weather for city: {}", city);

        tracing::debug!("Stage: {}", LookupStage::ResolvingCoords);
        let coords = self
            .client
            .resolve_coordinates(city)
            .await
            .map_err(|e| failed(LookupStage::ResolvingCoords, e))?;

        tracing::debug!("Stage: {}", LookupStage::FetchingForecast);
        let raw = self
            .client
            .fetch_forecast(coords)
            .await
            .map_err(|e| failed(LookupStage::FetchingForecast, e))?;

        tracing::debug!("Stage: {}", LookupStage::ExtractingCurrent);
        let current = extract_current(&raw).map_err(|e| failed(LookupStage::ExtractingCurrent, e))?;

        tracing::debug!("Stage: {}", LookupStage::BuildingForecast);
        let entries = raw.list.as_deref().unwrap_or(&[]);
        let forecast = build_forecast_window(entries, city);

        let mut records = Vec::with_capacity(forecast.len() + 1);
        records.push(current);
        records.extend(forecast);

        tracing::info!("Weather lookup for {} produced {} records", city, records.len());
        Ok(records)
    }

    /// Same as [`get_weather_for_city`](Self::get_weather_for_city), but
    /// returns `Error::Cancelled` as soon as `token` is cancelled.
    pub async fn get_weather_for_city_with_cancel(
        &self,
        city: &str,
        token: &CancellationToken,
    ) -> Result<Vec<WeatherRecord>> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::warn!("Weather lookup for {} cancelled", city);
                Err(Error::Cancelled)
            }
            result = self.get_weather_for_city(city) => result,
        }
    }
}

fn failed(stage: LookupStage, err: Error) -> Error {
    tracing::warn!(stage = %stage, "Weather lookup failed: {}", err);
    err
}
