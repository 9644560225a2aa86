//! Satellite map configuration.

use caddie_core::geo::GeoPoint;
use caddie_core::map_scale::{FAR_TARGET_ZOOM, MapProjection, VECTOR_TILE_SIZE};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_tile_size() -> u32 {
    VECTOR_TILE_SIZE
}

const fn default_zoom() -> f64 {
    FAR_TARGET_ZOOM
}

const fn default_latitude() -> f64 {
    37.5485
}

const fn default_longitude() -> f64 {
    -121.9242
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    /// Tile size of the map renderer in pixels (512 vector, 256 raster).
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,

    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// Aim point used when none is given on the command line.
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,

    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            default_zoom: default_zoom(),
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
        }
    }
}

impl MapConfig {
    pub fn projection(&self) -> Result<MapProjection, ConfigError> {
        MapProjection::for_tile_size(self.tile_size)
            .map_err(|e| ConfigError::invalid("map.tile_size", e.to_string()))
    }

    pub const fn default_center(&self) -> GeoPoint {
        GeoPoint::new(self.default_latitude, self.default_longitude)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.projection()?;
        if !self.default_zoom.is_finite() {
            return Err(ConfigError::invalid("map.default_zoom", "must be finite"));
        }
        if !(-90.0..=90.0).contains(&self.default_latitude) {
            return Err(ConfigError::invalid(
                "map.default_latitude",
                format!("{} is outside [-90, 90]", self.default_latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&self.default_longitude) {
            return Err(ConfigError::invalid(
                "map.default_longitude",
                format!("{} is outside [-180, 180]", self.default_longitude),
            ));
        }
        Ok(())
    }
}
