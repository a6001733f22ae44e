//! Service configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::catalog::CatalogSource;
use crate::fare::RateTable;
use crate::routing::{DEFAULT_FALLBACK_KM, OsrmConfig};
use crate::search::SearchConfig;

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Path to the bilingual location dataset.
    pub locations_path: PathBuf,

    /// Routing backend settings.
    pub osrm: OsrmConfig,

    /// Distance used when a route lookup fails, in km.
    pub fallback_km: f64,

    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,

    pub search: SearchConfig,
    pub rates: RateTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8888)),
            locations_path: PathBuf::from(crate::catalog::DEFAULT_DATA_PATH),
            osrm: OsrmConfig::default(),
            fallback_km: DEFAULT_FALLBACK_KM,
            cors_origins: Vec::new(),
            search: SearchConfig::default(),
            rates: RateTable::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, starting from the defaults.
    ///
    /// Unset or empty variables keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = parse("BIND_ADDR", &addr)?;
        }
        if let Some(path) = get("LOCATIONS_PATH") {
            config.locations_path = PathBuf::from(path);
        }
        if let Some(url) = get("OSRM_BASE_URL") {
            config.osrm.base_url = url;
        }
        if let Some(secs) = get("OSRM_TIMEOUT_SECS") {
            config.osrm.timeout_secs = parse("OSRM_TIMEOUT_SECS", &secs)?;
        }
        if let Some(km) = get("DEFAULT_DISTANCE_KM") {
            config.fallback_km = parse_positive("DEFAULT_DISTANCE_KM", &km)?;
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(rate) = get("NON_AC_RATE_PER_KM") {
            config.rates.non_ac_per_km = parse_positive("NON_AC_RATE_PER_KM", &rate)?;
        }
        if let Some(rate) = get("AC_RATE_PER_KM") {
            config.rates.ac_per_km = parse_positive("AC_RATE_PER_KM", &rate)?;
        }

        Ok(config)
    }

    /// The catalog source this configuration points at.
    pub fn catalog_source(&self) -> CatalogSource {
        CatalogSource::file(&self.locations_path)
    }
}

fn parse<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

fn parse_positive(name: &'static str, value: &str) -> Result<f64, ConfigError> {
    let parsed: f64 = parse(name, value)?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        })
    }
}
