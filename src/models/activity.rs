// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity models: the raw list item and the derived table row.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Activity as returned by `GET /athlete/activities`.
///
/// Only the fields the table uses are decoded; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawActivity {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: f64,
    /// Elapsed time in seconds
    #[serde(default)]
    pub elapsed_time: f64,
    #[serde(default)]
    pub total_elevation_gain: Option<f64>,
    #[serde(rename = "type", default)]
    pub activity_type: String,
    /// Local wall-clock start, e.g. `2024-05-01T07:30:00Z` (the `Z` is not UTC)
    #[serde(default)]
    pub start_date_local: Option<String>,
    /// `[lat, lng]`, empty or null for activities without GPS
    #[serde(default)]
    pub end_latlng: Option<Vec<f64>>,
    #[serde(default)]
    pub average_cadence: Option<f64>,
    #[serde(default)]
    pub average_heartrate: Option<f64>,
}

impl RawActivity {
    /// Unpack `end_latlng` into `(lat, lon)`.
    pub fn end_coordinates(&self) -> Option<(f64, f64)> {
        match self.end_latlng.as_deref() {
            Some([lat, lon]) => Some((*lat, *lon)),
            _ => None,
        }
    }
}

/// One row of the activity table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRow {
    pub id: u64,
    pub name: String,
    /// Distance in kilometers
    pub distance: f64,
    /// Moving time in minutes
    pub moving_time: f64,
    /// Elapsed time in minutes
    pub elapsed_time: f64,
    pub total_elevation_gain: Option<f64>,
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Calendar date of the local start time
    pub start_date_local: NaiveDate,
    pub end_lat: Option<f64>,
    pub end_lon: Option<f64>,
    pub average_cadence: Option<f64>,
    pub average_heartrate: Option<f64>,
    /// Local time halfway through the activity
    pub mid_time: NaiveDateTime,
}

impl ActivityRow {
    /// End coordinates, if the activity recorded GPS.
    pub fn end_coordinates(&self) -> Option<(f64, f64)> {
        self.end_lat.zip(self.end_lon)
    }
}
