use crate::models::{City, WeatherRecord};

/// Formats the search history into a human-readable string
pub fn format_history(cities: &[City]) -> String {
    if cities.is_empty() {
        return "Search history is empty.".to_string();
    }

    let mut output = String::from("Search History:\n\n");
    for city in cities {
        output.push_str(&format!("  [{}] {}\n", city.id, city.name));
    }
    output
}

/// Formats a lookup result: current conditions first, then the daily forecast
pub fn format_weather(records: &[WeatherRecord]) -> String {
    let Some((current, forecast)) = records.split_first() else {
        return "No weather data available.".to_string();
    };

    let mut output = format!("Current Weather for {} ({}):\n", current.city, current.date);
    output.push_str(&format_conditions(current));

    if !forecast.is_empty() {
        output.push_str("\nForecast:\n\n");
        for day in forecast {
            output.push_str(&format!("{}:\n", day.date));
            output.push_str(&format_conditions(day));
            output.push('\n');
        }
    }
    output
}

fn format_conditions(record: &WeatherRecord) -> String {
    format!(
        "  Temperature: {:.1}\u{00b0}F\n  Wind Speed: {:.1} mph\n  Humidity: {:.0}%\n  Icon: {}\n",
        record.temperature, record.wind_speed, record.humidity, record.weather_icon
    )
}
