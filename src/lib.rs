//! Weather lookup by city name with a persisted search history.
//!
//! The library holds the history store, the upstream API client and the
//! normalization of forecast payloads; the binary exposes them as MCP tools.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod history;
pub mod models;
pub mod normalize;
pub mod server;
pub mod weather;

pub use client::WeatherApiClient;
pub use config::{ApiConfig, Config};
pub use error::{Error, Result};
pub use history::HistoryStore;
pub use models::{City, Coordinates, WeatherRecord};
pub use server::WeatherServer;
pub use weather::{LookupStage, WeatherService};
