// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API clients and business logic.

pub mod activity;
pub mod emoji;
pub mod http;
pub mod strava;
pub mod table;
pub mod weather;

pub use activity::{EnrichOutcome, EnrichReport, WeatherEnricher};
pub use emoji::EmojiTable;
pub use http::{ApiClient, RequestOptions};
pub use strava::StravaClient;
pub use table::ActivityTable;
pub use weather::{degrees_to_cardinal, WeatherClient, WeatherQuery};
