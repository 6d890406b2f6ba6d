//! Server configuration.
//!
//! Every setting has a default; environment variables override them.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: &'static str,
}

/// Map presentation defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    /// Initial map centre (latitude, longitude)
    pub center: (f64, f64),

    /// Initial zoom level
    pub zoom: u8,

    /// Zoom level used when flying to a selected stop
    pub focus_zoom: u8,

    /// Label of the station marker
    pub station_name: String,

    /// Station marker position (latitude, longitude)
    pub station: (f64, f64),
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: (35.907, 139.6239),
            zoom: 16,
            focus_zoom: 17,
            station_name: "Omiya Station".to_string(),
            station: (35.9069, 139.6235),
        }
    }
}

/// Configuration for the stop directory server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// JSON file holding the stop collection.
    pub stops_path: PathBuf,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// How often the details panel is re-projected while a stop is active.
    pub refresh_interval: Duration,

    /// Select the first stop once the catalog is loaded.
    pub select_first_on_startup: bool,

    /// Map defaults passed through to the page.
    pub map: MapConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            stops_path: PathBuf::from("data/stops.json"),
            static_dir: PathBuf::from("static"),
            refresh_interval: Duration::from_secs(60),
            select_first_on_startup: true,
            map: MapConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build from the process environment.
    ///
    /// | Variable                  | Default           |
    /// |---------------------------|-------------------|
    /// | `STOP_SERVER_ADDR`        | `127.0.0.1:3000`  |
    /// | `STOPS_PATH`              | `data/stops.json` |
    /// | `STATIC_DIR`              | `static`          |
    /// | `DETAILS_REFRESH_SECS`    | `60`              |
    /// | `SELECT_FIRST_ON_STARTUP` | `true`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("STOP_SERVER_ADDR") {
            config.addr = value.parse().map_err(|_| ConfigError {
                var: "STOP_SERVER_ADDR",
                value: value.clone(),
                reason: "expected host:port",
            })?;
        }

        if let Some(value) = lookup("STOPS_PATH") {
            config.stops_path = PathBuf::from(value);
        }

        if let Some(value) = lookup("STATIC_DIR") {
            config.static_dir = PathBuf::from(value);
        }

        if let Some(value) = lookup("DETAILS_REFRESH_SECS") {
            let secs: u64 = value.parse().map_err(|_| ConfigError {
                var: "DETAILS_REFRESH_SECS",
                value: value.clone(),
                reason: "expected a whole number of seconds",
            })?;
            if secs == 0 {
                return Err(ConfigError {
                    var: "DETAILS_REFRESH_SECS",
                    value,
                    reason: "must be at least 1",
                });
            }
            config.refresh_interval = Duration::from_secs(secs);
        }

        if let Some(value) = lookup("SELECT_FIRST_ON_STARTUP") {
            config.select_first_on_startup = parse_bool(&value).ok_or(ConfigError {
                var: "SELECT_FIRST_ON_STARTUP",
                value,
                reason: "expected true or false",
            })?;
        }

        Ok(config)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
