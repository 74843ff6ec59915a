// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Remote calls do not use these: the HTTP helper logs failures and hands
//! back `None`. These cover startup, emoji lookups and file I/O.

use crate::config::ConfigError;
use crate::models::DayPeriod;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Strava authentication failed: {0}")]
    Auth(String),

    #[error("No {period} emoji for weather condition {condition:?}")]
    MissingEmoji { condition: String, period: DayPeriod },

    #[error("Emoji table error: {0}")]
    EmojiTable(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True when the error means "this condition has no glyph", which
    /// skips one activity rather than aborting the run.
    pub fn is_missing_emoji(&self) -> bool {
        matches!(self, AppError::MissingEmoji { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
