// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-Weather: add historical weather to Strava activities
//!
//! Pulls the athlete's activities from Strava, looks up the weather at the
//! end point of each one halfway through it (weatherapi.com history API),
//! and writes a one-line summary into the description and an emoji into
//! the name.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
