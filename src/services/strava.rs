// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for fetching and updating activities.
//!
//! Handles:
//! - Refresh-token exchange at construction
//! - Paginated activity listing
//! - Activity detail fetches
//! - Name/description updates (replace, append or prepend)
//!
//! Append/prepend re-read the current value before writing. Two writers
//! racing on the same activity can lose an update; nothing guards that.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::http::{ApiClient, RequestOptions};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Strava's maximum page size for `/athlete/activities`.
pub const PAGE_SIZE: u32 = 200;

/// Strava API client holding a short-lived access token.
#[derive(Clone, Debug)]
pub struct StravaClient {
    api: ApiClient,
    base_url: String,
    access_token: String,
}

impl StravaClient {
    /// Exchange the configured refresh token for an access token.
    ///
    /// Failing to get a token is fatal; there is no retry.
    pub async fn connect(api: ApiClient, config: &Config) -> Result<Self> {
        tracing::info!("Requesting Strava access token");

        let options = RequestOptions::new().form([
            ("client_id", config.strava_client_id.as_str()),
            ("client_secret", config.strava_client_secret.as_str()),
            ("refresh_token", config.strava_refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ]);

        let body = api
            .call(Method::POST, &config.strava_auth_url, options)
            .await
            .ok_or_else(|| AppError::Auth("token request failed".to_string()))?;

        let token: TokenRefreshResponse = serde_json::from_value(body)
            .map_err(|e| AppError::Auth(format!("unexpected token response: {}", e)))?;

        tracing::info!(expires_at = ?token.expires_at, "Access token retrieved");
        Ok(Self::with_token(api, &config.strava_api_url, token.access_token))
    }

    /// Client for an already-issued access token.
    pub fn with_token(api: ApiClient, base_url: &str, access_token: impl Into<String>) -> Self {
        Self {
            api,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    fn activity_url(&self, activity_id: u64) -> String {
        format!("{}/activities/{}", self.base_url, activity_id)
    }

    fn authorized(&self) -> RequestOptions {
        RequestOptions::new().bearer(&self.access_token)
    }

    /// Fetch pages `page_initial..=max_pages` of the athlete's activities.
    ///
    /// Stops at the first empty (or failed) page. Pages are newest first,
    /// so the result is ordered newest activity first.
    pub async fn fetch_activities(&self, page_initial: u32, max_pages: u32) -> Vec<Value> {
        let url = format!("{}/athlete/activities", self.base_url);
        let mut activities = Vec::new();
        let mut page = page_initial;

        while page <= max_pages {
            tracing::info!(page, "Retrieving page of activities");

            let options = self
                .authorized()
                .query("per_page", PAGE_SIZE)
                .query("page", page);

            let batch = match self.api.call(Method::GET, &url, options).await {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    tracing::warn!(page, payload = %other, "Unexpected activities payload");
                    break;
                }
                None => {
                    tracing::warn!(page, "Activity page unavailable, stopping");
                    break;
                }
            };

            if batch.is_empty() {
                break;
            }
            activities.extend(batch);
            page += 1;
        }

        tracing::info!(count = activities.len(), "Activities loaded");
        activities
    }

    /// Get a detailed activity by ID.
    pub async fn get_activity(&self, activity_id: u64) -> Option<Value> {
        self.api
            .call(Method::GET, &self.activity_url(activity_id), self.authorized())
            .await
    }

    /// Partially update an activity with `(field, value)` pairs.
    pub async fn update_activity(
        &self,
        activity_id: u64,
        fields: &[(&str, &str)],
    ) -> Option<Value> {
        let body: Map<String, Value> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();

        self.api
            .call(
                Method::PUT,
                &self.activity_url(activity_id),
                self.authorized().json(Value::Object(body)),
            )
            .await
    }

    /// Update an activity's description, optionally appending to the
    /// current one after a blank line.
    pub async fn update_activity_description(
        &self,
        activity_id: u64,
        new_description: &str,
        append: bool,
    ) -> Option<Value> {
        let (old, description) = if append {
            let old = self.current_field(activity_id, "description").await?;
            let combined = append_text(old.as_deref(), new_description);
            (old, combined)
        } else {
            (None, new_description.to_string())
        };

        tracing::info!(
            activity_id,
            from = ?old,
            to = %description,
            "Updating activity description"
        );
        self.update_activity(activity_id, &[("description", description.as_str())])
            .await
    }

    /// Update an activity's name, optionally prepending to the current one
    /// with a space.
    pub async fn update_activity_name(
        &self,
        activity_id: u64,
        new_name: &str,
        prepend: bool,
    ) -> Option<Value> {
        let (old, name) = if prepend {
            let old = self.current_field(activity_id, "name").await?;
            let combined = prepend_text(new_name, old.as_deref());
            (old, combined)
        } else {
            (None, new_name.to_string())
        };

        tracing::info!(activity_id, from = ?old, to = %name, "Updating activity name");
        self.update_activity(activity_id, &[("name", name.as_str())]).await
    }

    /// Re-read one string field. Outer `None` means the fetch failed.
    async fn current_field(&self, activity_id: u64, field: &str) -> Option<Option<String>> {
        let Some(activity) = self.get_activity(activity_id).await else {
            tracing::warn!(activity_id, field, "Could not re-read activity, skipping update");
            return None;
        };
        Some(activity.get(field).and_then(Value::as_str).map(str::to_string))
    }
}

/// Append `addition` to `existing` after a blank line.
pub fn append_text(existing: Option<&str>, addition: &str) -> String {
    match existing {
        Some(desc) if !desc.is_empty() => format!("{}\n\n{}", desc, addition),
        _ => addition.to_string(),
    }
}

/// Put `prefix` in front of `existing`, separated by a space.
pub fn prepend_text(prefix: &str, existing: Option<&str>) -> String {
    match existing {
        Some(name) if !name.is_empty() => format!("{} {}", prefix, name),
        _ => prefix.to_string(),
    }
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}
