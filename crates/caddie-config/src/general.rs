//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Shot library file. Empty means `<data_dir>/caddie/shots.json`.
    #[serde(default)]
    pub data_path: String,
}

impl GeneralConfig {
    /// Resolve the library path, falling back to the platform data directory.
    pub fn library_path(&self) -> Result<PathBuf, ConfigError> {
        if !self.data_path.is_empty() {
            return Ok(PathBuf::from(&self.data_path));
        }
        dirs::data_dir()
            .map(|p| p.join("caddie").join("shots.json"))
            .ok_or(ConfigError::NoDataDir)
    }
}
