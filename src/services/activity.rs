// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather enrichment of activities.
//!
//! Handles the core workflow, per activity:
//! 1. Fetch the activity and skip it if the description already has weather
//! 2. Look up end coordinates and mid time in the activity table
//! 3. Fetch the weather for the hour nearest the mid time
//! 4. Append the summary to the description and prepend the emoji to the name
//!
//! Every failure stays local to one activity and is counted in the report.

use crate::models::ActivityRow;
use crate::services::emoji::EmojiTable;
use crate::services::strava::{append_text, StravaClient};
use crate::services::table::ActivityTable;
use crate::services::weather::{format_summary, WeatherClient, WeatherQuery};
use crate::time_utils;
use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;

/// Marker used to detect if an activity has already been annotated.
pub const SIGNATURE_MARKER: &str = "albertizard";

/// Appended after the weather summary; contains [`SIGNATURE_MARKER`].
pub const ATTRIBUTION_SUFFIX: &str = " - by albertizard dot com";

/// What happened to one activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// Weather added (or would have been, in a dry run)
    Updated,
    /// Description already carried the signature marker
    AlreadyHadWeather,
    /// No coordinates, no observation, or no emoji for the condition
    WeatherUnavailable,
    /// Detail fetch failed or the id is not in the table
    ActivityUnavailable,
    /// The description write was rejected
    UpdateFailed,
}

/// Per-outcome counters for one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub total: usize,
    pub updated: usize,
    pub already_had_weather: usize,
    pub weather_unavailable: usize,
    pub activity_unavailable: usize,
    pub update_failed: usize,
}

impl EnrichReport {
    pub fn record(&mut self, outcome: EnrichOutcome) {
        self.total += 1;
        match outcome {
            EnrichOutcome::Updated => self.updated += 1,
            EnrichOutcome::AlreadyHadWeather => self.already_had_weather += 1,
            EnrichOutcome::WeatherUnavailable => self.weather_unavailable += 1,
            EnrichOutcome::ActivityUnavailable => self.activity_unavailable += 1,
            EnrichOutcome::UpdateFailed => self.update_failed += 1,
        }
    }
}

impl fmt::Display for EnrichReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weather added to: {}/{} activities.", self.updated, self.total)?;
        writeln!(f, "\t{} already had weather info.", self.already_had_weather)?;
        write!(f, "\t{} weather could not be retrieved.", self.weather_unavailable)?;
        if self.activity_unavailable > 0 {
            write!(f, "\n\t{} could not be read from Strava.", self.activity_unavailable)?;
        }
        if self.update_failed > 0 {
            write!(f, "\n\t{} could not be updated.", self.update_failed)?;
        }
        Ok(())
    }
}

/// Adds weather summaries to Strava activities.
pub struct WeatherEnricher {
    strava: StravaClient,
    weather: WeatherClient,
    emojis: EmojiTable,
    dry_run: bool,
}

impl WeatherEnricher {
    /// Enricher that only reports what it would write when `dry_run` is set.
    pub fn new(
        strava: StravaClient,
        weather: WeatherClient,
        emojis: EmojiTable,
        dry_run: bool,
    ) -> Self {
        Self {
            strava,
            weather,
            emojis,
            dry_run,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Enrich each id in turn. `table` must hold rows for the ids.
    pub async fn enrich_activities(
        &self,
        activity_ids: &[u64],
        table: &ActivityTable,
    ) -> EnrichReport {
        let mut report = EnrichReport::default();

        for &activity_id in activity_ids {
            let outcome = self.enrich_activity(activity_id, table).await;
            tracing::debug!(activity_id, ?outcome, "Activity done");
            report.record(outcome);
        }

        tracing::info!(
            total = report.total,
            updated = report.updated,
            already_had_weather = report.already_had_weather,
            weather_unavailable = report.weather_unavailable,
            activity_unavailable = report.activity_unavailable,
            update_failed = report.update_failed,
            dry_run = self.dry_run,
            "Weather enrichment finished"
        );
        report
    }

    /// Enrich activities from the last `n_days` days (today included).
    pub async fn enrich_recent(
        &self,
        table: &ActivityTable,
        n_days: u32,
        today: NaiveDate,
    ) -> EnrichReport {
        let ids = table.recent_ids(n_days, today);
        tracing::info!(
            n_days,
            count = ids.len(),
            "Adding weather information to recent activities"
        );
        self.enrich_activities(&ids, table).await
    }

    /// Run the enrichment steps for one activity.
    pub async fn enrich_activity(&self, activity_id: u64, table: &ActivityTable) -> EnrichOutcome {
        let Some(detail) = self.strava.get_activity(activity_id).await else {
            tracing::warn!(activity_id, "Could not fetch activity");
            return EnrichOutcome::ActivityUnavailable;
        };

        let old_description = detail
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if old_description.contains(SIGNATURE_MARKER) {
            tracing::info!(activity_id, "Activity already had weather information, skipping");
            return EnrichOutcome::AlreadyHadWeather;
        }

        let Some(row) = table.get(activity_id) else {
            tracing::warn!(activity_id, "Activity is not in the activity table");
            return EnrichOutcome::ActivityUnavailable;
        };

        let Some(query) = weather_query(row) else {
            tracing::warn!(activity_id, "Activity has no end coordinates");
            return EnrichOutcome::WeatherUnavailable;
        };

        tracing::info!(
            activity_id,
            date = %query.date,
            hour = query.hour,
            "Getting weather information"
        );
        let Some(observation) = self.weather.fetch(&query).await else {
            return EnrichOutcome::WeatherUnavailable;
        };

        let weather = match format_summary(&observation, &self.emojis) {
            Ok(weather) => weather,
            Err(e) => {
                tracing::warn!(activity_id, error = %e, "Cannot format weather summary");
                return EnrichOutcome::WeatherUnavailable;
            }
        };

        let new_description = append_text(
            Some(old_description),
            &format!("{}{}", weather.summary, ATTRIBUTION_SUFFIX),
        );

        if self.dry_run {
            tracing::info!(
                activity_id,
                summary = %weather.summary,
                emoji = %weather.emoji,
                "Dry run, not updating activity"
            );
            return EnrichOutcome::Updated;
        }

        tracing::info!(activity_id, "Adding weather information to activity");

        // The description already includes the old text, so replace rather than append
        if self
            .strava
            .update_activity_description(activity_id, &new_description, false)
            .await
            .is_none()
        {
            return EnrichOutcome::UpdateFailed;
        }

        if self
            .strava
            .update_activity_name(activity_id, &weather.emoji, true)
            .await
            .is_none()
        {
            tracing::warn!(activity_id, "Description updated but name update failed");
        }

        EnrichOutcome::Updated
    }
}

/// Weather lookup for a row: end coordinates, hour nearest the mid time.
pub fn weather_query(row: &ActivityRow) -> Option<WeatherQuery> {
    let (lat, lon) = row.end_coordinates()?;
    let (date, hour) = time_utils::weather_lookup_hour(row.mid_time);
    Some(WeatherQuery::new(lat, lon, date, hour))
}
