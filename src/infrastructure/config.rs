use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;

use crate::domain::series::DEFAULT_TIME_SERIES_CAPACITY;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    /// Resolve `host` (an IP literal or a name such as `localhost`) and
    /// take the first address.
    pub async fn resolve_addr(&self) -> anyhow::Result<SocketAddr> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("failed to resolve host {}", self.host))?
            .next()
            .with_context(|| format!("no address found for host {}", self.host))
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    /// Updates per second at start-up, 1..=5.
    #[serde(default = "default_frequency")]
    pub initial_frequency: u32,
    /// Points kept by the RCS and speed/distance charts.
    #[serde(default = "default_capacity")]
    pub series_capacity: usize,
    #[serde(default = "default_password")]
    pub unlock_password: String,
    /// Fixed seed for reproducible samples; entropy when unset.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            initial_frequency: default_frequency(),
            series_capacity: default_capacity(),
            unlock_password: default_password(),
            rng_seed: None,
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_frequency() -> u32 {
    1
}

fn default_capacity() -> usize {
    DEFAULT_TIME_SERIES_CAPACITY
}

fn default_password() -> String {
    "1234".to_string()
}

fn default_event_buffer() -> usize {
    64
}

/// Load `config/dashboard.*` (optional) overlaid with `RADAR__*` env vars.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("RADAR").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
