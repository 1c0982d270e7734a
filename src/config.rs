use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub engine_binary: String,
    pub probe_timeout: Duration,
    pub request_timeout: Duration,
    pub simulate: bool,
    pub log_level: String,
}

/// Settings that drive backend selection
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Binary name looked up in `PATH`, or a path
    pub binary: String,
    pub probe_timeout: Duration,
    /// Skip detection and always use the simulated backend
    pub simulate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
            probe_timeout: Duration::from_secs(3),
            simulate: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("DOCKPANEL_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            engine_binary: env::var("DOCKPANEL_ENGINE").unwrap_or_else(|_| "docker".to_string()),
            probe_timeout: env::var("DOCKPANEL_PROBE_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(3)),
            request_timeout: env::var("DOCKPANEL_REQUEST_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30)),
            simulate: env::var("DOCKPANEL_SIMULATE")
                .map(|s| parse_flag(&s))
                .unwrap_or(false),
            log_level: env::var("DOCKPANEL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            binary: self.engine_binary.clone(),
            probe_timeout: self.probe_timeout,
            simulate: self.simulate,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
