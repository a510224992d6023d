/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-lookup-server/0.1.0";

/// Search history document, relative to the working directory
pub const HISTORY_FILE: &str = "searchHistory.json";

/// Unit system requested from the forecast endpoint
pub const UNITS: &str = "imperial";

/// Timestamp suffix of the forecast entry that represents a day
pub const MIDNIGHT_SUFFIX: &str = "00:00:00";

/// Maximum number of days in the forecast window
pub const FORECAST_DAYS: usize = 5;

/// Date used when an upstream entry carries no timestamp
pub const UNKNOWN_DATE: &str = "Unknown Date";

pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_API_TIMEOUT_SECS: &str = "API_TIMEOUT_SECS";
