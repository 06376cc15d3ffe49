//! Client configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the catalog service
    pub base_url: String,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
    /// Path of the persisted settings file
    pub settings_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            http_timeout: Duration::from_secs(30),
            settings_path: PathBuf::from("astro-settings.json"),
        }
    }
}

impl ClientConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `ASTRO_API_BASE_URL` (optional, default: `http://localhost:8000`)
    /// - `ASTRO_HTTP_TIMEOUT_SECS` (optional, default: 30)
    /// - `ASTRO_SETTINGS_PATH` (optional, default: `astro-settings.json`)
    ///
    /// # Errors
    /// Returns an error if `ASTRO_HTTP_TIMEOUT_SECS` is set but not a
    /// valid number of seconds.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let base_url = env::var("ASTRO_API_BASE_URL").unwrap_or(defaults.base_url);
        let http_timeout = match env::var("ASTRO_HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| "ASTRO_HTTP_TIMEOUT_SECS must be a number of seconds".to_string())?;
                Duration::from_secs(secs)
            }
            Err(_) => defaults.http_timeout,
        };
        let settings_path = env::var("ASTRO_SETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.settings_path);

        Ok(Self {
            base_url,
            http_timeout,
            settings_path,
        })
    }
}
