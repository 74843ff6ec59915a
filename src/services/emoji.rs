// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather condition → emoji table.
//!
//! The builtin table is keyed by the exact condition text weatherapi.com
//! reports. Some conditions only have a glyph for one time of day
//! ("Sunny" is day-only, "Clear" is night-only); looking up the other slot
//! is an error, never a silent default.

use crate::error::{AppError, Result};
use crate::models::{DayPeriod, Emoji};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// `(presentation form, bare code points)`
type Glyph = (&'static str, &'static str);

const SUN: Glyph = ("\u{2600}\u{fe0f}", "\u{2600}");
const MOON: Glyph = ("\u{1f319}", "\u{1f319}");
const SUN_BEHIND_CLOUD: Glyph = ("\u{1f324}\u{fe0f}", "\u{1f324}");
const MOON_AND_CLOUD: Glyph = ("\u{1f319}\u{2601}\u{fe0f}", "\u{1f319}\u{2601}");
const CLOUD: Glyph = ("\u{2601}\u{fe0f}", "\u{2601}");
const FOG: Glyph = ("\u{1f32b}\u{fe0f}", "\u{1f32b}");
const SUN_AND_RAIN: Glyph = ("\u{1f326}\u{fe0f}", "\u{1f326}");
const RAIN: Glyph = ("\u{1f327}\u{fe0f}", "\u{1f327}");
const SNOW_CLOUD: Glyph = ("\u{1f328}\u{fe0f}", "\u{1f328}");
const SNOWFLAKE: Glyph = ("\u{2744}\u{fe0f}", "\u{2744}");
const THUNDER: Glyph = ("\u{26c8}\u{fe0f}", "\u{26c8}");
const ICE: Glyph = ("\u{1f9ca}", "\u{1f9ca}");

/// `(condition, day glyph, night glyph)`
const BUILTIN: &[(&str, Option<Glyph>, Option<Glyph>)] = &[
    ("Sunny", Some(SUN), None),
    ("Clear", None, Some(MOON)),
    ("Partly Cloudy", Some(SUN_BEHIND_CLOUD), Some(MOON_AND_CLOUD)),
    ("Cloudy", Some(CLOUD), Some(CLOUD)),
    ("Overcast", Some(CLOUD), Some(CLOUD)),
    ("Mist", Some(FOG), Some(FOG)),
    ("Patchy rain nearby", Some(SUN_AND_RAIN), Some(RAIN)),
    ("Patchy snow nearby", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Patchy sleet nearby", Some(RAIN), Some(RAIN)),
    ("Patchy freezing drizzle nearby", Some(RAIN), Some(RAIN)),
    ("Thundery outbreaks in nearby", Some(THUNDER), Some(THUNDER)),
    ("Blowing snow", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Blizzard", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Fog", Some(FOG), Some(FOG)),
    ("Freezing fog", Some(FOG), Some(FOG)),
    ("Patchy light drizzle", Some(SUN_AND_RAIN), Some(RAIN)),
    ("Light drizzle", Some(SUN_AND_RAIN), Some(RAIN)),
    ("Freezing drizzle", Some(RAIN), Some(RAIN)),
    ("Heavy freezing drizzle", Some(RAIN), Some(RAIN)),
    ("Patchy light rain", Some(SUN_AND_RAIN), Some(RAIN)),
    ("Light rain", Some(SUN_AND_RAIN), Some(RAIN)),
    ("Moderate rain at times", Some(RAIN), Some(RAIN)),
    ("Moderate rain", Some(RAIN), Some(RAIN)),
    ("Heavy rain at times", Some(RAIN), Some(RAIN)),
    ("Heavy rain", Some(RAIN), Some(RAIN)),
    ("Light freezing rain", Some(RAIN), Some(RAIN)),
    ("Moderate or heavy freezing rain", Some(RAIN), Some(RAIN)),
    ("Light sleet", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Moderate or heavy sleet", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Patchy light snow", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Light snow", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Patchy moderate snow", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Moderate snow", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Patchy heavy snow", Some(SNOWFLAKE), Some(SNOWFLAKE)),
    ("Heavy snow", Some(SNOWFLAKE), Some(SNOWFLAKE)),
    ("Ice pellets", Some(ICE), Some(ICE)),
    ("Light rain shower", Some(SUN_AND_RAIN), Some(RAIN)),
    ("Moderate or heavy rain shower", Some(RAIN), Some(RAIN)),
    ("Torrential rain shower", Some(RAIN), Some(RAIN)),
    ("Light sleet showers", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Moderate or heavy sleet showers", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Light snow showers", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Moderate or heavy snow showers", Some(SNOW_CLOUD), Some(SNOW_CLOUD)),
    ("Light showers of ice pellets", Some(ICE), Some(ICE)),
    ("Moderate or heavy showers of ice pellets", Some(ICE), Some(ICE)),
    ("Patchy light rain in area with thunder", Some(THUNDER), Some(THUNDER)),
    ("Moderate or heavy rain in area with thunder", Some(THUNDER), Some(THUNDER)),
    ("Patchy light snow in area with thunder", Some(THUNDER), Some(THUNDER)),
    ("Moderate or heavy snow in area with thunder", Some(THUNDER), Some(THUNDER)),
];

/// Default file name used by `emojis export`.
pub const DEFAULT_EMOJI_FILE: &str = "weather_emojis.json";

/// Condition text → time of day → glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmojiTable {
    entries: BTreeMap<String, BTreeMap<DayPeriod, Emoji>>,
}

impl EmojiTable {
    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        for (condition, day, night) in BUILTIN {
            let slots: BTreeMap<DayPeriod, Emoji> =
                [(DayPeriod::Day, day), (DayPeriod::Night, night)]
                    .into_iter()
                    .filter_map(|(period, glyph)| {
                        glyph.map(|(emoji, emoji_unicode)| {
                            (
                                period,
                                Emoji {
                                    emoji: emoji.to_string(),
                                    emoji_unicode: emoji_unicode.to_string(),
                                },
                            )
                        })
                    })
                    .collect();
            entries.insert(condition.to_string(), slots);
        }
        Self { entries }
    }

    /// Look up the glyph for an exact condition text and time of day.
    pub fn lookup(&self, condition: &str, period: DayPeriod) -> Result<&Emoji> {
        self.entries
            .get(condition)
            .and_then(|slots| slots.get(&period))
            .ok_or_else(|| AppError::MissingEmoji {
                condition: condition.to_string(),
                period,
            })
    }

    /// Number of conditions in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every `(condition, period, glyph)` triple, conditions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DayPeriod, &Emoji)> {
        self.entries.iter().flat_map(|(condition, slots)| {
            slots
                .iter()
                .map(move |(period, emoji)| (condition.as_str(), *period, emoji))
        })
    }

    /// Parse a table from its JSON export.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries = serde_json::from_str(json)
            .map_err(|e| AppError::EmojiTable(format!("Invalid emoji JSON: {}", e)))?;
        Ok(Self { entries })
    }

    /// Serialize the table; glyphs are written literally, not `\u` escaped.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries)
            .map_err(|e| AppError::EmojiTable(format!("Failed to serialize emojis: {}", e)))
    }

    /// Load a table from a JSON file.
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            AppError::EmojiTable(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let table = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), conditions = table.len(), "Loaded emoji table");
        Ok(table)
    }

    /// Write the table to a JSON file.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|e| {
            AppError::EmojiTable(format!("Failed to write {}: {}", path.display(), e))
        })?;
        tracing::info!(path = %path.display(), conditions = self.len(), "Wrote emoji table");
        Ok(())
    }
}
