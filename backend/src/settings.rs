//! Service configuration loaded via OrthoConfig.
//!
//! Values merge from CLI flags, `BOOKINGS_*` environment variables and
//! configuration files. Everything is optional; accessors supply defaults.

use std::ffi::OsString;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Configuration failures that abort startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(String),
    #[error("invalid host address: {0}")]
    InvalidHost(String),
    #[error("unknown storage backend `{0}`; expected `memory` or `postgres`")]
    UnknownStorage(String),
    #[error("a database URL is required when storage is `postgres`")]
    MissingDatabaseUrl,
    #[error("pool size must be at least 1")]
    EmptyPool,
}

/// Which storage adapter backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Ephemeral in-process store; contents vanish on restart.
    #[default]
    Memory,
    /// PostgreSQL via Diesel.
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(SettingsError::UnknownStorage(s.to_owned())),
        }
    }
}

/// Raw settings as loaded by OrthoConfig.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKINGS")]
pub struct AppSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// TCP port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// `memory` or `postgres`; defaults to `memory`.
    pub storage: Option<String>,
    /// PostgreSQL connection string for the `postgres` backend.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Skip embedded migrations on startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl AppSettings {
    /// Load settings from the given CLI arguments plus environment and files.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|err| SettingsError::Load(err.to_string()))
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| SettingsError::InvalidHost(raw.to_owned()))?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Selected storage backend.
    pub fn storage_backend(&self) -> Result<StorageBackend, SettingsError> {
        self.storage
            .as_deref()
            .map_or(Ok(StorageBackend::default()), StorageBackend::from_str)
    }

    /// Database URL, required for the `postgres` backend.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Pool size, defaulting to 10.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }
}
