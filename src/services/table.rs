// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity table: the bulk-fetch payload reshaped into typed rows.
//!
//! Rows keep the fetch order (newest first) and are unique by id.

use crate::models::{ActivityRow, RawActivity};
use crate::time_utils;
use chrono::{Days, NaiveDate};
use serde_json::Value;
use std::collections::HashSet;

/// Activity type kept when the caller doesn't pick one.
pub const DEFAULT_ACTIVITY_TYPE: &str = "Run";

/// Activities of one type, in tabular form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityTable {
    rows: Vec<ActivityRow>,
}

impl ActivityTable {
    /// Build the table from raw `/athlete/activities` items, keeping only
    /// activities whose `type` equals `activity_type`.
    pub fn build(activities: &[Value], activity_type: &str) -> Self {
        let mut seen = HashSet::new();
        let mut rows = Vec::new();

        for item in activities {
            if item.get("type").and_then(Value::as_str) != Some(activity_type) {
                continue;
            }

            let raw: RawActivity = match serde_json::from_value(item.clone()) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(
                        id = ?item.get("id"),
                        error = %e,
                        "Skipping malformed activity"
                    );
                    continue;
                }
            };

            if !seen.insert(raw.id) {
                tracing::debug!(activity_id = raw.id, "Duplicate activity in listing");
                continue;
            }

            if let Some(row) = to_row(raw) {
                rows.push(row);
            }
        }

        tracing::info!(
            activity_type,
            input = activities.len(),
            rows = rows.len(),
            "Built activity table"
        );
        Self { rows }
    }

    pub fn rows(&self) -> &[ActivityRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for one activity id.
    pub fn get(&self, id: u64) -> Option<&ActivityRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Ids of activities that started on or after `since`.
    pub fn ids_since(&self, since: NaiveDate) -> Vec<u64> {
        self.rows
            .iter()
            .filter(|row| row.start_date_local >= since)
            .map(|row| row.id)
            .collect()
    }

    /// Ids of activities from the last `n_days` days, today included.
    pub fn recent_ids(&self, n_days: u32, today: NaiveDate) -> Vec<u64> {
        let since = today
            .checked_sub_days(Days::new(u64::from(n_days)))
            .unwrap_or(NaiveDate::MIN);
        self.ids_since(since)
    }
}

/// Derive the row columns and rescale units (km, minutes).
fn to_row(raw: RawActivity) -> Option<ActivityRow> {
    let Some(start) = raw
        .start_date_local
        .as_deref()
        .and_then(time_utils::parse_local_datetime)
    else {
        tracing::warn!(
            activity_id = raw.id,
            start_date_local = ?raw.start_date_local,
            "Skipping activity without a usable start time"
        );
        return None;
    };

    // End coordinates are more reliable than start: GPS lock improves en route
    let (end_lat, end_lon) = match raw.end_coordinates() {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (None, None),
    };

    Some(ActivityRow {
        id: raw.id,
        name: raw.name,
        distance: raw.distance / 1000.0,
        moving_time: raw.moving_time / 60.0,
        elapsed_time: raw.elapsed_time / 60.0,
        total_elevation_gain: raw.total_elevation_gain,
        activity_type: raw.activity_type,
        start_date_local: start.date(),
        end_lat,
        end_lon,
        average_cadence: raw.average_cadence,
        average_heartrate: raw.average_heartrate,
        mid_time: time_utils::mid_time(start, raw.elapsed_time),
    })
}
