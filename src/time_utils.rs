// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.
//!
//! Strava's `start_date_local` is local wall-clock time written with a `Z`
//! suffix, so everything here works on naive (zone-less) timestamps.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Timelike};

/// Offset added to an activity's mid time before picking the weather hour,
/// so that e.g. 07:40 rounds to the 08:00 observation.
pub const WEATHER_HOUR_OFFSET_MINUTES: i64 = 30;

/// Parse a Strava local timestamp, with or without a zone suffix.
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").ok())
}

/// Halfway point between `start` and `start + elapsed_secs`.
pub fn mid_time(start: NaiveDateTime, elapsed_secs: f64) -> NaiveDateTime {
    start + Duration::milliseconds((elapsed_secs * 500.0).round() as i64)
}

/// Date and hour of the weather observation closest to `mid_time`.
pub fn weather_lookup_hour(mid_time: NaiveDateTime) -> (NaiveDate, u32) {
    let shifted = mid_time + Duration::minutes(WEATHER_HOUR_OFFSET_MINUTES);
    (shifted.date(), shifted.hour())
}
