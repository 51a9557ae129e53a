use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/client.toml";

/// Client runtime configuration.
///
/// Sources stack as defaults, then an optional TOML file, then environment
/// variables prefixed `GRUZZOLO_` (e.g. `GRUZZOLO_BASE_URL`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin; endpoints live under `<base_url>/api`.
    pub base_url: String,
    /// Identity-provider token-exchange endpoint.
    pub token_url: String,
    /// Identity-provider API key. Refresh is disabled without one.
    pub api_key: Option<String>,
    /// IANA timezone the dashboard windows resolve in.
    pub timezone: String,
    /// Where the session file is kept.
    pub state_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            token_url: "https://securetoken.googleapis.com/v1/token".to_string(),
            api_key: None,
            timezone: "UTC".to_string(),
            state_path: "config/session.json".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parsed timezone. An unknown name falls back to UTC rather than
    /// breaking every window computation.
    pub fn tz(&self) -> Tz {
        match self.timezone.parse() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!(timezone = %self.timezone, "unknown timezone, falling back to UTC");
                chrono_tz::UTC
            }
        }
    }
}

/// Loads configuration from `config/client.toml` (optional) and the
/// environment.
pub fn load() -> Result<ClientConfig> {
    load_from(DEFAULT_CONFIG_PATH)
}

/// Same as [`load`], from an explicit file path.
pub fn load_from(path: &str) -> Result<ClientConfig> {
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("GRUZZOLO"));
    let settings: ClientConfig = builder.build()?.try_deserialize()?;
    Ok(settings)
}
