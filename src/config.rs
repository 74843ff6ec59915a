//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is loaded first if present, so
//! the four API secrets can live next to the binary during local use.

use std::env;
use std::time::Duration;

const DEFAULT_STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
const DEFAULT_STRAVA_AUTH_URL: &str = "https://www.strava.com/oauth/token";
const DEFAULT_WEATHER_API_URL: &str = "https://api.weatherapi.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Secrets ---
    /// Strava OAuth client ID
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Long-lived Strava refresh token, exchanged for an access token at startup
    pub strava_refresh_token: String,
    /// weatherapi.com key
    pub weather_api_key: String,

    // --- Endpoints (overridable for tests) ---
    /// Strava REST API base URL
    pub strava_api_url: String,
    /// Strava OAuth token endpoint
    pub strava_auth_url: String,
    /// weatherapi.com base URL
    pub weather_api_url: String,
    /// Per-request timeout applied by the HTTP helper
    pub http_timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            strava_refresh_token: "test_refresh_token".to_string(),
            weather_api_key: "test_weather_key".to_string(),
            strava_api_url: DEFAULT_STRAVA_API_URL.to_string(),
            strava_auth_url: DEFAULT_STRAVA_AUTH_URL.to_string(),
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_env_with(|k| env::var(k).ok())
    }

    /// Read configuration values through `get`, so tests don't have to
    /// mutate the global environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut required = |name: &'static str| {
            get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let strava_client_id = required("STRAVA_CLIENT_ID")?;
        let strava_client_secret = required("STRAVA_CLIENT_SECRET")?;
        let strava_refresh_token = required("STRAVA_REFRESH_TOKEN")?;
        let weather_api_key = required("WEATHERAPI_KEY")?;

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid("HTTP_TIMEOUT_SECS", raw))?,
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            strava_client_id,
            strava_client_secret,
            strava_refresh_token,
            weather_api_key,
            strava_api_url: get("STRAVA_API_URL")
                .unwrap_or_else(|| DEFAULT_STRAVA_API_URL.to_string()),
            strava_auth_url: get("STRAVA_AUTH_URL")
                .unwrap_or_else(|| DEFAULT_STRAVA_AUTH_URL.to_string()),
            weather_api_url: get("WEATHERAPI_URL")
                .unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string()),
            http_timeout,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
