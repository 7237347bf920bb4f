// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables such as `AUTHAPP_SERVER__PORT=9000`.
use crate::auth::password::{DEFAULT_COST_LOG_N, MAX_COST_LOG_N, MIN_COST_LOG_N};
use ::config::{Config, Environment, File, FileFormat};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "AUTHAPP";

/// Config file read by [`Settings::load`] when present
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub log: LogSettings,
    pub app: AppInfo,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Token and password hashing settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthSettings {
    /// Bearer token lifetime in seconds
    pub token_ttl_secs: u64,
    /// scrypt work factor for newly stored hashes
    pub password_cost_log_n: u8,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human readable text
    pub json: bool,
}

/// Service identity reported by the system endpoints
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_ttl_secs: 60 * 60, // 1 hour
            password_cost_log_n: DEFAULT_COST_LOG_N,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: "user-management-service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            auth: AuthSettings::default(),
            log: LogSettings::default(),
            app: AppInfo::default(),
        }
    }
}

impl Settings {
    /// Load from `config/default.toml` (if present) and `AUTHAPP_*` env vars
    pub fn load() -> Result<Self> {
        Self::load_layered(Some(Path::new(DEFAULT_CONFIG_PATH)), false, ENV_PREFIX)
    }

    /// Load from an explicit file, which must exist, plus `AUTHAPP_*` env vars
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_layered(Some(path.as_ref()), true, ENV_PREFIX)
    }

    pub(crate) fn load_layered(
        path: Option<&Path>,
        required: bool,
        env_prefix: &str,
    ) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }
        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("failed to parse configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        if self.auth.token_ttl_secs == 0 {
            bail!("auth.token_ttl_secs must be greater than zero");
        }
        if !(MIN_COST_LOG_N..=MAX_COST_LOG_N).contains(&self.auth.password_cost_log_n) {
            bail!(
                "auth.password_cost_log_n must be between {MIN_COST_LOG_N} and {MAX_COST_LOG_N}"
            );
        }
        if !LOG_LEVELS.contains(&self.log.level.to_lowercase().as_str()) {
            bail!("log.level must be one of {}", LOG_LEVELS.join(", "));
        }
        Ok(())
    }

    /// Resolve the listen address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        (self.server.host.as_str(), self.server.port)
            .to_socket_addrs()
            .with_context(|| format!("cannot resolve {}:{}", self.server.host, self.server.port))?
            .next()
            .with_context(|| format!("no address for {}:{}", self.server.host, self.server.port))
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.auth.token_ttl_secs)
    }
}
