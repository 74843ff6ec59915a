// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava client tests against a mocked API: token exchange, pagination
//! and name/description updates.

use serde_json::{json, Value};
use strava_weather::error::AppError;
use strava_weather::services::StravaClient;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

fn page_of(count: usize, first_id: u64) -> Value {
    Value::Array(
        (0..count as u64)
            .map(|i| common::activity_json(first_id + i, "Run", "2024-05-01T07:00:00Z"))
            .collect(),
    )
}

async fn mount_page(server: &MockServer, page: u32, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(query_param("page", page.to_string()))
        .and(query_param("per_page", "200"))
        .and(header("authorization", format!("Bearer {}", common::ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_connect_exchanges_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=test_refresh_token"))
        .and(body_string_contains("client_id=test_client_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/activities/1"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let strava = StravaClient::connect(common::test_api(), &common::test_config(&server))
        .await
        .expect("connect");

    assert_eq!(strava.get_activity(1).await, Some(json!({"id": 1})));
}

#[tokio::test]
async fn test_connect_fails_when_token_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Bad Request",
            "errors": [{"resource": "RefreshToken", "code": "invalid"}]
        })))
        .mount(&server)
        .await;

    let result = StravaClient::connect(common::test_api(), &common::test_config(&server)).await;
    assert!(matches!(result, Err(AppError::Auth(_))));
}

#[tokio::test]
async fn test_connect_fails_without_access_token_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
        .mount(&server)
        .await;

    let result = StravaClient::connect(common::test_api(), &common::test_config(&server)).await;
    assert!(matches!(result, Err(AppError::Auth(_))));
}

#[tokio::test]
async fn test_fetch_activities_stops_at_empty_page() {
    let server = MockServer::start().await;
    let strava = common::test_strava(&server).await;

    mount_page(&server, 1, page_of(200, 1_000), 1).await;
    mount_page(&server, 2, page_of(200, 2_000), 1).await;
    mount_page(&server, 3, json!([]), 1).await;
    mount_page(&server, 4, page_of(5, 4_000), 0).await;

    let activities = strava.fetch_activities(1, 99).await;

    assert_eq!(activities.len(), 400);
    assert_eq!(activities[0]["id"], 1_000);
    assert_eq!(activities[399]["id"], 2_199);
}

#[tokio::test]
async fn test_fetch_activities_respects_max_pages() {
    let server = MockServer::start().await;
    let strava = common::test_strava(&server).await;

    mount_page(&server, 2, page_of(200, 2_000), 1).await;
    mount_page(&server, 3, page_of(200, 3_000), 1).await;
    mount_page(&server, 4, page_of(200, 4_000), 0).await;

    let activities = strava.fetch_activities(2, 3).await;

    assert_eq!(activities.len(), 400);
    assert_eq!(activities[0]["id"], 2_000);
}

#[tokio::test]
async fn test_fetch_activities_empty_first_page() {
    let server = MockServer::start().await;
    let strava = common::test_strava(&server).await;

    mount_page(&server, 1, json!([]), 1).await;

    assert!(strava.fetch_activities(1, 99).await.is_empty());
}

#[tokio::test]
async fn test_fetch_activities_stops_on_failed_page() {
    let server = MockServer::start().await;
    let strava = common::test_strava(&server).await;

    mount_page(&server, 1, page_of(200, 1_000), 1).await;
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, 3, page_of(200, 3_000), 0).await;

    assert_eq!(strava.fetch_activities(1, 99).await.len(), 200);
}

#[tokio::test]
async fn test_get_activity_not_found() {
    let server = MockServer::start().await;
    let strava = common::test_strava(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/activities/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Record Not Found"})))
        .mount(&server)
        .await;

    assert!(strava.get_activity(404).await.is_none());
}

#[tokio::test]
async fn test_update_description_appends_after_blank_line() {
    let server = MockServer::start().await;
    let strava = common::test_strava(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/activities/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::activity_detail(
            42,
            "Morning Run",
            Some("Felt great"),
        )))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v3/activities/42"))
        .and(body_partial_json(json!({"description": "Felt great\n\nSunny"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let result = strava.update_activity_description(42, "Sunny", true).await;
    assert_eq!(result, Some(json!({"id": 42})));
}

#[tokio::test]
async fn test_update_description_replace_skips_reread() {
    let server = MockServer::start().await;
    let strava = common::test_strava(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/activities/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v3/activities/42"))
        .and(body_partial_json(json!({"description": "Only this"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(strava
        .update_activity_description(42, "Only this", false)
        .await
        .is_some());
}

#[tokio::test]
async fn test_update_name_prepends_with_space() {
    let server = MockServer::start().await;
    let strava = common::test_strava(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/activities/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::activity_detail(
            7,
            "Lunch Run",
            None,
        )))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v3/activities/7"))
        .and(body_partial_json(json!({"name": "\u{2600} Lunch Run"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(strava.update_activity_name(7, "\u{2600}", true).await.is_some());
}

#[tokio::test]
async fn test_update_skipped_when_reread_fails() {
    let server = MockServer::start().await;
    let strava = common::test_strava(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/activities/9"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v3/activities/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
        .expect(0)
        .mount(&server)
        .await;

    assert!(strava.update_activity_name(9, "x", true).await.is_none());
    assert!(strava.update_activity_description(9, "x", true).await.is_none());
}

#[tokio::test]
async fn test_update_rejected_is_none() {
    let server = MockServer::start().await;
    let strava = common::test_strava(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/v3/activities/5"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Authorization Error"})))
        .mount(&server)
        .await;

    assert!(strava
        .update_activity(5, &[("name", "a"), ("description", "b")])
        .await
        .is_none());
}
