//! Web-Mercator ground resolution.
//!
//! The overlay's apparent radius is `axis_meters / meters_per_pixel`. The
//! zoom-0 constant must match the tile size of the base map actually drawn
//! underneath, otherwise the overlay drifts in scale as the user zooms.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::units::meters_to_yards;

/// Equatorial circumference of the Web-Mercator sphere in meters.
pub const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;

/// Tile edge used by vector-tile renderers.
pub const VECTOR_TILE_SIZE: u32 = 512;

/// Tile edge used by classic raster slippy maps.
pub const RASTER_TILE_SIZE: u32 = 256;

/// Zoom used when the target is close.
pub const NEAR_TARGET_ZOOM: f64 = 19.0;

/// Zoom used for long approach shots.
pub const FAR_TARGET_ZOOM: f64 = 17.0;

/// Targets closer than this (yards) get [`NEAR_TARGET_ZOOM`].
pub const NEAR_TARGET_YARDS: f64 = 220.0;

/// Ground resolution of a tile pyramid at zoom 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MapProjection {
    /// Meters covered by one pixel at zoom 0 on the equator.
    pub meters_per_pixel_at_zoom0: f64,
}

impl MapProjection {
    /// 512 px tiles: 78 271.517 m/px at zoom 0.
    pub const VECTOR: Self = Self {
        meters_per_pixel_at_zoom0: EARTH_CIRCUMFERENCE_M / VECTOR_TILE_SIZE as f64,
    };

    /// 256 px tiles: 156 543.034 m/px at zoom 0.
    pub const RASTER: Self = Self {
        meters_per_pixel_at_zoom0: EARTH_CIRCUMFERENCE_M / RASTER_TILE_SIZE as f64,
    };

    /// Projection for a renderer with square tiles of `tile_size` pixels.
    pub fn for_tile_size(tile_size: u32) -> Result<Self, CoreError> {
        if tile_size == 0 {
            return Err(CoreError::Validation("tile size must be positive".into()));
        }
        Ok(Self {
            meters_per_pixel_at_zoom0: EARTH_CIRCUMFERENCE_M / f64::from(tile_size),
        })
    }

    /// Ground meters spanned by one pixel at fractional `zoom` and `latitude`
    /// (degrees).
    #[must_use]
    pub fn meters_per_pixel(self, zoom: f64, latitude: f64) -> f64 {
        self.meters_per_pixel_at_zoom0 * latitude.to_radians().cos() / zoom.exp2()
    }

    #[must_use]
    pub fn yards_per_pixel(self, zoom: f64, latitude: f64) -> f64 {
        meters_to_yards(self.meters_per_pixel(zoom, latitude))
    }
}

impl Default for MapProjection {
    fn default() -> Self {
        Self::VECTOR
    }
}

/// [`MapProjection::meters_per_pixel`] on the default 512 px pyramid.
#[must_use]
pub fn meters_per_pixel(zoom: f64, latitude: f64) -> f64 {
    MapProjection::VECTOR.meters_per_pixel(zoom, latitude)
}

/// Zoom to open the map at for a target `distance_yards` away.
#[must_use]
pub fn suggested_zoom(distance_yards: f64) -> f64 {
    if distance_yards < NEAR_TARGET_YARDS {
        NEAR_TARGET_ZOOM
    } else {
        FAR_TARGET_ZOOM
    }
}
