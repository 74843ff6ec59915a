// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod weather;

pub use activity::{ActivityRow, RawActivity};
pub use weather::{Condition, DayPeriod, Emoji, WeatherObservation, WeatherSummary};
