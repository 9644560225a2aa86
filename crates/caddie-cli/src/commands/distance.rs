use caddie_core::geo::GeoPoint;
use caddie_core::map_scale::{MapProjection, suggested_zoom};
use caddie_core::readout::TargetDistance;
use schemars::JsonSchema;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{DistanceArgs, ScaleArgs};
use crate::output::output;

#[derive(Debug, Serialize, JsonSchema)]
pub struct DistanceReport {
    pub from: Option<GeoPoint>,
    pub to: GeoPoint,
    pub distance: TargetDistance,
    /// Whole yards as shown on the HUD.
    pub display_yards: Option<i64>,
    /// Map zoom matching this distance.
    pub suggested_zoom: Option<f64>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ScaleReport {
    pub zoom: f64,
    pub latitude: f64,
    pub tile_size: u32,
    pub meters_per_pixel: f64,
    pub yards_per_pixel: f64,
}

/// Handle `caddie distance`.
pub fn handle_distance(args: &DistanceArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let distance = TargetDistance::between(args.from, args.to);
    output(
        &DistanceReport {
            from: args.from,
            to: args.to,
            distance,
            display_yards: distance.rounded_yards(),
            suggested_zoom: distance.yards().map(suggested_zoom),
        },
        flags.format,
    )
}

/// Handle `caddie scale`.
pub fn handle_scale(args: &ScaleArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !args.zoom.is_finite() || !(-90.0..=90.0).contains(&args.lat) {
        anyhow::bail!("invalid map position: zoom {} at latitude {}", args.zoom, args.lat);
    }
    let projection = MapProjection::for_tile_size(args.tile_size)?;
    output(
        &ScaleReport {
            zoom: args.zoom,
            latitude: args.lat,
            tile_size: args.tile_size,
            meters_per_pixel: projection.meters_per_pixel(args.zoom, args.lat),
            yards_per_pixel: projection.yards_per_pixel(args.zoom, args.lat),
        },
        flags.format,
    )
}
