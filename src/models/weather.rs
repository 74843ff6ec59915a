// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weather observation and summary models (weatherapi.com history API).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition block of an hourly record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub text: String,
}

/// One hourly record from `forecast.forecastday[0].hour[0]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherObservation {
    pub condition: Condition,
    pub temp_c: f64,
    pub humidity: f64,
    pub wind_kph: f64,
    pub wind_dir: String,
    #[serde(default)]
    pub wind_degree: Option<f64>,
    /// 1 during daylight, 0 at night
    pub is_day: u8,
}

impl WeatherObservation {
    pub fn period(&self) -> DayPeriod {
        if self.is_day == 1 {
            DayPeriod::Day
        } else {
            DayPeriod::Night
        }
    }
}

/// Time-of-day slot in the emoji table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPeriod {
    Day,
    Night,
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPeriod::Day => f.write_str("day"),
            DayPeriod::Night => f.write_str("night"),
        }
    }
}

/// A glyph for one condition/period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    /// Presentation form (with variation selector where one exists)
    pub emoji: String,
    /// Bare code point(s), used in summaries and activity names
    pub emoji_unicode: String,
}

/// Rendered weather line plus the glyph used for the activity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSummary {
    pub summary: String,
    pub emoji: String,
}
