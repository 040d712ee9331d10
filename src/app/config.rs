//! Server and client configuration.
//!
//! Server settings are layered: built-in defaults, an optional TOML file,
//! environment variables, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::domain::AppError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const HOME_DIR_NAME: &str = ".woopy";

pub const HOST_ENV: &str = "WOOPY_HOST";
pub const PORT_ENV: &str = "WOOPY_PORT";
pub const HOME_ENV: &str = "WOOPY_HOME";
const LEGACY_HOST_ENV: &str = "FLASK_HOST";
const LEGACY_PORT_ENV: &str = "FLASK_PORT";

/// Settings for `woopy serve`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory that receives one sub-directory per generated project.
    pub home: PathBuf,
    /// Store each `POST /` bundle under `home`.
    pub persist: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            home: default_home(),
            persist: true,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers in place.
#[derive(Debug, Clone, Default)]
pub struct ServerOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub home: Option<PathBuf>,
    pub no_persist: bool,
}

/// `~/.woopy`, or `./.woopy` when no home directory is known.
pub fn default_home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(HOME_DIR_NAME)
}

impl ServerConfig {
    /// Resolve the full configuration from file, process environment and flags.
    pub fn load(config_path: Option<&Path>, overrides: ServerOverrides) -> Result<Self, AppError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::InputNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment values read through `lookup`. `WOOPY_*` wins over the legacy names.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = non_empty(HOST_ENV).or_else(|| non_empty(LEGACY_HOST_ENV)) {
            self.host = host.trim().to_string();
        }

        let port_source = if non_empty(PORT_ENV).is_some() { PORT_ENV } else { LEGACY_PORT_ENV };
        if let Some(port) = non_empty(port_source) {
            self.port = port.trim().parse().map_err(|_| {
                AppError::config_error(format!("{} must be a port number, got '{}'", port_source, port))
            })?;
        }

        if let Some(home) = non_empty(HOME_ENV) {
            self.home = PathBuf::from(home);
        }

        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: ServerOverrides) {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(home) = overrides.home {
            self.home = home;
        }
        if overrides.no_persist {
            self.persist = false;
        }
    }

    /// `host:port` for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for talking to a remote woopy server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(server_url: &str, timeout_secs: u64) -> Result<Self, AppError> {
        let server_url = Url::parse(server_url).map_err(|e| {
            AppError::config_error(format!("Invalid server URL '{}': {}", server_url, e))
        })?;
        if timeout_secs == 0 {
            return Err(AppError::config_error("Timeout must be at least one second"));
        }
        Ok(Self { server_url, timeout: Duration::from_secs(timeout_secs) })
    }
}
