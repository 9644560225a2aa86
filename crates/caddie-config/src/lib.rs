//! # caddie-config
//!
//! Layered configuration loading for Caddie using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CADDIE_*` prefix, `__` as separator)
//! 2. Project-level `.caddie/config.toml`
//! 3. User-level `~/.config/caddie/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CADDIE_MAP__TILE_SIZE` -> `map.tile_size`,
//! `CADDIE_CHART__JITTER_SEED` -> `chart.jitter_seed`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use caddie_config::CaddieConfig;
//!
//! let config = CaddieConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! let projection = config.map.projection().expect("tile size");
//! println!("library at {:?}", config.general.library_path());
//! ```

mod chart;
mod error;
mod general;
mod ingest;
mod map;

pub use chart::ChartConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use ingest::IngestConfig;
pub use map::MapConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CaddieConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CaddieConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so callers can layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".caddie/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("CADDIE_").split("__"))
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.map.validate()?;
        self.chart.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("caddie").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CaddieConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.ingest.flip_offline_sign);
        assert!(config.chart.include_mishits);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: CaddieConfig = CaddieConfig::figment().extract()?;
            assert_eq!(config.map.tile_size, 512);
            assert_eq!(config.chart.contour_points, 64);
            Ok(())
        });
    }
}
