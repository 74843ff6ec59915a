// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! weatherapi.com history client and weather summary formatting.

use crate::config::Config;
use crate::error::Result;
use crate::models::{WeatherObservation, WeatherSummary};
use crate::services::emoji::EmojiTable;
use crate::services::http::{ApiClient, RequestOptions};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use reqwest::Method;
use serde_json::Value;

const CARDINALS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Where and when to look up the weather.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
    pub date: NaiveDate,
    /// Hour of day, 0-23
    pub hour: u32,
}

impl WeatherQuery {
    pub fn new(lat: f64, lon: f64, date: NaiveDate, hour: u32) -> Self {
        Self {
            lat,
            lon,
            date,
            hour,
        }
    }

    /// Query for the hour containing `time`.
    pub fn at(lat: f64, lon: f64, time: NaiveDateTime) -> Self {
        Self::new(lat, lon, time.date(), time.hour())
    }
}

/// weatherapi.com client.
#[derive(Clone, Debug)]
pub struct WeatherClient {
    api: ApiClient,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api: ApiClient, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            api,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(api: ApiClient, config: &Config) -> Self {
        Self::new(api, &config.weather_api_url, config.weather_api_key.clone())
    }

    /// History endpoint URL for one coordinate, date and hour.
    pub fn history_url(&self, query: &WeatherQuery) -> String {
        format!(
            "{}/v1/history.json?key={}&q={},{}&dt={}&hour={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            query.lat,
            query.lon,
            query.date.format("%Y-%m-%d"),
            query.hour
        )
    }

    /// Fetch the hourly observation for `query`.
    ///
    /// `None` when the call fails or the payload has no hourly record.
    pub async fn fetch(&self, query: &WeatherQuery) -> Option<WeatherObservation> {
        let url = self.history_url(query);
        let body = self.api.call(Method::GET, &url, RequestOptions::new()).await;

        let observation = body.as_ref().and_then(select_hour);
        if observation.is_none() {
            tracing::warn!(
                lat = query.lat,
                lon = query.lon,
                date = %query.date,
                hour = query.hour,
                "Weather data is empty, no weather summary was produced"
            );
        }
        observation
    }
}

/// Pick the single hourly record out of a history response.
///
/// The request pins the hour, so the record is always the first (and only)
/// element of the first day's `hour` list.
pub fn select_hour(body: &Value) -> Option<WeatherObservation> {
    let hour = body.pointer("/forecast/forecastday/0/hour/0")?;
    match serde_json::from_value(hour.clone()) {
        Ok(observation) => Some(observation),
        Err(e) => {
            tracing::warn!(error = %e, "Malformed hourly weather record");
            None
        }
    }
}

/// Compass label for a wind bearing, in 22.5° sectors centred on each label.
pub fn degrees_to_cardinal(degrees: f64) -> &'static str {
    let index = ((degrees + 11.25) / 22.5).floor() as i64;
    CARDINALS[index.rem_euclid(16) as usize]
}

/// Render `"{emoji} {condition}, {temp}°C, humidity {h}%, wind {speed} km/h from {dir}"`.
///
/// Fails when the emoji table has no glyph for the condition at this time
/// of day.
pub fn format_summary(
    observation: &WeatherObservation,
    emojis: &EmojiTable,
) -> Result<WeatherSummary> {
    let emoji = &emojis
        .lookup(&observation.condition.text, observation.period())?
        .emoji_unicode;

    let summary = format!(
        "{} {}, {}\u{b0}C, humidity {}%, wind {} km/h from {}",
        emoji,
        observation.condition.text,
        observation.temp_c,
        observation.humidity,
        observation.wind_kph,
        observation.wind_dir
    );

    Ok(WeatherSummary {
        summary,
        emoji: emoji.clone(),
    })
}
