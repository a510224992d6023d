//! Pure mapping from the upstream forecast payload to `WeatherRecord`s.

use crate::constants::{FORECAST_DAYS, MIDNIGHT_SUFFIX, UNKNOWN_DATE};
use crate::error::{Error, Result};
use crate::models::{RawForecastEntry, RawForecastResponse, WeatherRecord};

/// Maps one upstream entry, substituting defaults for any missing field:
///
/// | field        | source              | fallback         |
/// |--------------|---------------------|------------------|
/// | temperature  | `main.temp`         | 0                |
/// | wind_speed   | `wind.speed`        | 0                |
/// | humidity     | `main.humidity`     | 0                |
/// | weather_icon | `weather[0].icon`   | empty string     |
/// | date         | `dt_txt`            | `"Unknown Date"` |
pub fn normalize_entry(entry: &RawForecastEntry, city: &str) -> WeatherRecord {
    let main = entry.main.as_ref();

    WeatherRecord {
        city: city.to_string(),
        temperature: main.and_then(|m| m.temp).unwrap_or(0.0),
        wind_speed: entry.wind.as_ref().and_then(|w| w.speed).unwrap_or(0.0),
        humidity: main.and_then(|m| m.humidity).unwrap_or(0.0),
        uv_index: 0.0,
        weather_icon: entry
            .weather
            .as_ref()
            .and_then(|conditions| conditions.first())
            .and_then(|c| c.icon.clone())
            .unwrap_or_default(),
        date: entry
            .dt_txt
            .clone()
            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
    }
}

/// Current conditions: the first forecast entry, labelled with the
/// upstream city name.
pub fn extract_current(response: &RawForecastResponse) -> Result<WeatherRecord> {
    let city = response
        .city
        .as_ref()
        .ok_or_else(|| Error::InvalidResponse("missing city block".into()))?;
    let list = response
        .list
        .as_ref()
        .ok_or_else(|| Error::InvalidResponse("missing forecast list".into()))?;
    let first = list
        .first()
        .ok_or_else(|| Error::InvalidResponse("forecast list is empty".into()))?;

    let name = city.name.as_deref().unwrap_or_default();
    Ok(normalize_entry(first, name))
}

/// One record per day: entries stamped at midnight, in upstream order,
/// capped at `FORECAST_DAYS`. The timestamp is matched as text; no
/// timezone conversion happens.
pub fn build_forecast_window(entries: &[RawForecastEntry], city: &str) -> Vec<WeatherRecord> {
    entries
        .iter()
        .filter(|entry| {
            entry
                .dt_txt
                .as_deref()
                .is_some_and(|ts| ts.ends_with(MIDNIGHT_SUFFIX))
        })
        .take(FORECAST_DAYS)
        .map(|entry| normalize_entry(entry, city))
        .collect()
}
