// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use serde_json::{json, Value};
use std::time::Duration;
use strava_weather::config::Config;
use strava_weather::services::{ApiClient, StravaClient, WeatherClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Access token handed out by the mocked token endpoint.
#[allow(dead_code)]
pub const ACCESS_TOKEN: &str = "test_access_token";

/// Config pointing both APIs at `server`.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config {
        strava_api_url: format!("{}/api/v3", server.uri()),
        strava_auth_url: format!("{}/oauth/token", server.uri()),
        weather_api_url: server.uri(),
        http_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

#[allow(dead_code)]
pub fn test_api() -> ApiClient {
    ApiClient::new(Duration::from_secs(5)).expect("HTTP client should build")
}

/// Mount a token endpoint that always succeeds.
#[allow(dead_code)]
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "access_token": ACCESS_TOKEN,
            "refresh_token": "next_refresh_token",
            "expires_at": 1_714_550_400,
            "expires_in": 21600
        })))
        .mount(server)
        .await;
}

/// Authenticated Strava client against `server`.
#[allow(dead_code)]
pub async fn test_strava(server: &MockServer) -> StravaClient {
    mount_token_endpoint(server).await;
    StravaClient::connect(test_api(), &test_config(server))
        .await
        .expect("Token exchange should succeed")
}

#[allow(dead_code)]
pub fn test_weather(server: &MockServer) -> WeatherClient {
    WeatherClient::from_config(test_api(), &test_config(server))
}

/// Activity list item as Strava returns it.
#[allow(dead_code)]
pub fn activity_json(id: u64, activity_type: &str, start_date_local: &str) -> Value {
    json!({
        "id": id,
        "name": "Morning Run",
        "distance": 10000.0,
        "moving_time": 3000,
        "elapsed_time": 3600,
        "total_elevation_gain": 85.0,
        "type": activity_type,
        "sport_type": activity_type,
        "start_date": start_date_local,
        "start_date_local": start_date_local,
        "start_latlng": [37.39, -122.11],
        "end_latlng": [37.4, -122.1],
        "average_cadence": 84.5,
        "average_heartrate": 148.0
    })
}

/// Detailed activity as `GET /activities/{id}` returns it.
#[allow(dead_code)]
pub fn activity_detail(id: u64, name: &str, description: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": description,
        "type": "Run"
    })
}

/// weatherapi.com history response holding one hourly record.
#[allow(dead_code)]
pub fn history_body(condition: &str, is_day: u8) -> Value {
    json!({
        "location": {"name": "Palo Alto", "lat": 37.4, "lon": -122.1},
        "forecast": {"forecastday": [{
            "date": "2024-05-01",
            "hour": [{
                "time": "2024-05-01 08:00",
                "temp_c": 14.2,
                "is_day": is_day,
                "condition": {"text": condition, "code": 1000},
                "wind_kph": 9.4,
                "wind_degree": 247,
                "wind_dir": "WSW",
                "humidity": 71
            }]
        }]}
    })
}
