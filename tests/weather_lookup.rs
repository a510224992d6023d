//! Weather lookup against a mock upstream API.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use weather_lookup_server::{ApiConfig, Coordinates, Error, WeatherApiClient, WeatherService};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn geocode_body(lat: f64, lon: f64) -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "city": { "name": "Paris", "coord": { "lat": lat, "lon": lon } },
        "list": []
    })
}

/// 40 three-hour entries starting at 03:00, so exactly five are stamped at
/// midnight.
fn forecast_body(city: &str) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (1..=40)
        .map(|i| {
            let hours = i * 3;
            let day = 1 + hours / 24;
            let hour = hours % 24;
            serde_json::json!({
                "dt_txt": format!("2024-01-{:02} {:02}:00:00", day, hour),
                "main": { "temp": 40.0 + i as f64, "humidity": 60 + i },
                "wind": { "speed": 5.5 },
                "weather": [ { "icon": "04d" } ]
            })
        })
        .collect();

    serde_json::json!({ "city": { "name": city }, "list": list })
}

async fn mount_geocode(server: &MockServer, city: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", city))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn service(server: &MockServer) -> WeatherService {
    WeatherService::new(ApiConfig::new(server.uri(), API_KEY)).unwrap()
}

#[tokio::test]
async fn test_paris_lookup_returns_current_plus_five_days() {
    let server = MockServer::start().await;
    mount_geocode(&server, "Paris", geocode_body(48.85, 2.35)).await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(query_param("units", "imperial"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Paris")))
        .expect(1)
        .mount(&server)
        .await;

    let records = service(&server).get_weather_for_city("Paris").await.unwrap();

    assert_eq!(records.len(), 6);
    assert_eq!(records[0].date, "2024-01-01 03:00:00");
    assert_eq!(records[0].temperature, 41.0);
    for record in &records {
        assert!(record.humidity >= 0.0);
        assert_eq!(record.weather_icon, "04d");
        assert_eq!(record.uv_index, 0.0);
        assert_eq!(record.city, "Paris");
    }
    for record in &records[1..] {
        assert!(record.date.ends_with("00:00:00"), "{}", record.date);
    }
    assert_eq!(records[5].date, "2024-01-06 00:00:00");
}

#[tokio::test]
async fn test_forecast_records_use_requested_name() {
    let server = MockServer::start().await;
    mount_geocode(&server, "paris", geocode_body(48.85, 2.35)).await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "48.85"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Paris")))
        .mount(&server)
        .await;

    let records = service(&server).get_weather_for_city("paris").await.unwrap();

    assert_eq!(records[0].city, "Paris");
    assert!(records[1..].iter().all(|r| r.city == "paris"));
}

#[tokio::test]
async fn test_resolve_encodes_city_name() {
    let server = MockServer::start().await;
    mount_geocode(&server, "New York", geocode_body(40.7143, -74.006)).await;

    let client = WeatherApiClient::new(ApiConfig::new(server.uri(), API_KEY)).unwrap();
    let coords = client.resolve_coordinates("New York").await.unwrap();

    assert_eq!(coords, Coordinates { lat: 40.7143, long: -74.006 });
}

#[tokio::test]
async fn test_unknown_city_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let result = service(&server).get_weather_for_city("Atlantis").await;
    assert!(matches!(result, Err(Error::Network(_))), "{:?}", result);
}

#[tokio::test]
async fn test_missing_coordinates_is_invalid_response() {
    let server = MockServer::start().await;
    mount_geocode(&server, "Paris", serde_json::json!({ "city": { "name": "Paris" } })).await;

    let client = WeatherApiClient::new(ApiConfig::new(server.uri(), API_KEY)).unwrap();
    let result = client.resolve_coordinates("Paris").await;
    assert!(matches!(result, Err(Error::InvalidResponse(_))), "{:?}", result);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = WeatherApiClient::new(ApiConfig::new(server.uri(), API_KEY)).unwrap();
    let result = client.resolve_coordinates("Paris").await;
    assert!(matches!(result, Err(Error::InvalidResponse(_))), "{:?}", result);
}

#[tokio::test]
async fn test_forecast_failure_aborts_lookup() {
    let server = MockServer::start().await;
    mount_geocode(&server, "Paris", geocode_body(48.85, 2.35)).await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = service(&server).get_weather_for_city("Paris").await;
    assert!(matches!(result, Err(Error::Network(_))), "{:?}", result);
}

#[tokio::test]
async fn test_empty_forecast_list_is_invalid_response() {
    let server = MockServer::start().await;
    mount_geocode(&server, "Paris", geocode_body(48.85, 2.35)).await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("units", "imperial"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "city": { "name": "Paris" }, "list": [] })),
        )
        .mount(&server)
        .await;

    let result = service(&server).get_weather_for_city("Paris").await;
    assert!(matches!(result, Err(Error::InvalidResponse(_))), "{:?}", result);
}

#[tokio::test]
async fn test_request_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_body(48.85, 2.35))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = ApiConfig::new(server.uri(), API_KEY).with_timeout(Duration::from_millis(100));
    let client = WeatherApiClient::new(config).unwrap();
    let result = client.resolve_coordinates("Paris").await;
    assert!(matches!(result, Err(Error::Network(_))), "{:?}", result);
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_body(48.85, 2.35))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let result = service(&server)
        .get_weather_for_city_with_cancel("Paris", &token)
        .await;
    assert!(matches!(result, Err(Error::Cancelled)), "{:?}", result);
}
