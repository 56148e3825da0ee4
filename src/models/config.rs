//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::domain::view::DEFAULT_ITEMS_PER_PAGE;
use crate::services::registry::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE};

/// Minimum length of the cookie signing secret.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    /// Web app URL of the record store service.
    pub api_endpoint: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Dashboards kept in memory at once.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

fn default_session_idle_secs() -> u64 {
    DEFAULT_SESSION_IDLE.as_secs()
}

impl ServerConfig {
    /// Reads `config/default.yaml`, the optional `config/{APP_ENV}.yaml`
    /// profile (defaults to `local`) and `APP_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        let settings = Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?;

        let server_config: ServerConfig = settings.try_deserialize()?;
        server_config.validate()?;
        Ok(server_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }
        if self.api_endpoint.trim().is_empty() {
            return Err(ConfigError::Message("api_endpoint must be set".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Message("page_size must be positive".into()));
        }
        if self.max_sessions == 0 || self.session_idle_secs == 0 {
            return Err(ConfigError::Message(
                "max_sessions and session_idle_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}
