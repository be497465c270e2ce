//! Endpoint and request configuration.
//!
//! Service URLs and the request timeout are handed to the predictor at
//! construction, never read from embedded literals, so tests can point the
//! pipeline at local mock endpoints. An optional per-user file at
//! ~/.passwatch/config.json overrides any of the defaults; a missing or
//! malformed file falls back to the defaults silently.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_IP_URL: &str = "https://api.ipify.org?format=json";
pub const DEFAULT_GEO_URL: &str = "https://freegeoip.app/json";
pub const DEFAULT_PASS_URL: &str = "http://api.open-notify.org/iss-pass.json";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = concat!("passwatch/", env!("CARGO_PKG_VERSION"));

/// The three collaborator services, in pipeline order.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// IP lookup. GET with no parameters; body carries an `ip` string.
    pub ip_url: String,
    /// Geolocation base URL. The resolved IP is appended as a path segment.
    pub geo_url: String,
    /// Pass prediction. `lat`/`lon` are appended as query parameters.
    pub pass_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ip_url: DEFAULT_IP_URL.to_string(),
            geo_url: DEFAULT_GEO_URL.to_string(),
            pass_url: DEFAULT_PASS_URL.to_string(),
        }
    }
}

/// Everything the predictor needs at construction time.
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub endpoints: Endpoints,
    /// Per-request timeout. Explicit, never the transport's ambient default.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Optional per-user overrides. Every field is independent.
#[derive(Deserialize, Default)]
struct FileOverrides {
    #[serde(default)]
    ip_url: Option<String>,
    #[serde(default)]
    geo_url: Option<String>,
    #[serde(default)]
    pass_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl PredictorConfig {
    /// Load config, applying ~/.passwatch/config.json overrides when present.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".passwatch")
            .join("config.json")
    }

    /// Load from a specific path (for testing).
    pub fn load_from(path: &Path) -> Self {
        let overrides = fs::read_to_string(path)
            .ok()
            .and_then(|data| serde_json::from_str::<FileOverrides>(&data).ok())
            .unwrap_or_default();

        let mut config = Self::default();
        if let Some(url) = overrides.ip_url {
            config.endpoints.ip_url = url;
        }
        if let Some(url) = overrides.geo_url {
            config.endpoints.geo_url = url;
        }
        if let Some(url) = overrides.pass_url {
            config.endpoints.pass_url = url;
        }
        if let Some(secs) = overrides.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}
