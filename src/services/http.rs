// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic JSON request helper shared by the Strava and weather clients.
//!
//! Every failure (transport error, timeout, non-2xx status, undecodable
//! body) is logged here and surfaced as `None`. There is no retry: one
//! failed call is final for that invocation.

use crate::error::{AppError, Result};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

/// Per-call options: auth header, query string and body.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    bearer: Option<String>,
    query: Vec<(String, String)>,
    form: Option<Vec<(String, String)>>,
    json: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `Authorization: Bearer <token>`.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// URL-encoded form body.
    pub fn form<K: Into<String>, V: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.form = Some(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }
}

/// Thin wrapper over a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client build failed: {}", e)))?;
        Ok(Self { http })
    }

    /// Issue one request and decode its JSON body.
    ///
    /// Returns `None` on any failure; the cause has already been logged.
    pub async fn call(&self, method: Method, url: &str, options: RequestOptions) -> Option<Value> {
        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = &options.bearer {
            request = request.bearer_auth(token);
        }
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(form) = &options.form {
            request = request.form(form);
        }
        if let Some(body) = &options.json {
            request = request.json(body);
        }

        let display_url = redact_url(url);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log_transport_error(&method, &display_url, &e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body_snippet: String = body.chars().take(256).collect();

            if status.as_u16() == 429 {
                tracing::warn!(%method, url = %display_url, "Rate limit hit (429)");
            }
            tracing::warn!(
                %method,
                url = %display_url,
                status = %status,
                body = %body_snippet,
                "HTTP error occurred"
            );
            return None;
        }

        match response.json::<Value>().await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%method, url = %display_url, error = %e, "Response body is not valid JSON");
                None
            }
        }
    }
}

fn log_transport_error(method: &Method, url: &str, error: &reqwest::Error) {
    if error.is_timeout() {
        tracing::warn!(%method, url, error = %error, "Timeout error occurred");
    } else if error.is_connect() {
        tracing::warn!(%method, url, error = %error, "Connection error occurred");
    } else {
        tracing::warn!(%method, url, error = %error, "An unexpected request error occurred");
    }
}

/// Mask the value of any `key=` query parameter so API keys stay out of logs.
pub fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let params: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("key", _)) => "key=***".to_string(),
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", base, params.join("&"))
}
