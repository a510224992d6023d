use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Search History Models
// ============================================================================

/// A previously searched city. Field order matches the persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct City {
    pub name: String,
    pub id: String,
}

impl City {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

// ============================================================================
// Normalized Weather Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

/// Conditions for one city at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub city: String,
    pub temperature: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    /// Not supplied by the forecast endpoint; always 0.
    pub uv_index: f64,
    pub weather_icon: String,
    pub date: String,
}

// ============================================================================
// Upstream Forecast API Models
// ============================================================================
//
// Every field is optional: structural checks happen in `normalize`, and
// per-field gaps fall back to defaults there.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    pub city: Option<GeocodeCity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeCity {
    pub coord: Option<RawCoord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCoord {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawForecastResponse {
    pub city: Option<RawCity>,
    pub list: Option<Vec<RawForecastEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCity {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawForecastEntry {
    pub dt_txt: Option<String>,
    pub main: Option<RawMain>,
    pub wind: Option<RawWind>,
    pub weather: Option<Vec<RawCondition>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMain {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWind {
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCondition {
    pub icon: Option<String>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddCityRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct RemoveCityRequest {
    pub id: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherRequest {
    pub city: String,
}
