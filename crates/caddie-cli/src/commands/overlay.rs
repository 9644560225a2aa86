use caddie_core::ellipse::ClubDispersion;
use caddie_core::enums::ShotFilter;
use caddie_core::geo::GeoPoint;
use caddie_core::map_scale::suggested_zoom;
use caddie_core::overlay::{MapOverlay, MapView};
use caddie_core::readout::TargetDistance;
use schemars::JsonSchema;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OverlayArgs;
use crate::commands::shared::club::club_shots;
use crate::context::AppContext;
use crate::output::output;

/// Where the overlay zoom came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ZoomSource {
    Explicit,
    Distance,
    Config,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct OverlayReport {
    #[serde(flatten)]
    pub overlay: MapOverlay,
    pub zoom_source: ZoomSource,
    pub target_distance: TargetDistance,
}

/// Handle `caddie overlay`.
pub fn handle(args: &OverlayArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let map = &ctx.config.map;
    let aim = GeoPoint::new(
        args.lat.unwrap_or(map.default_latitude),
        args.lon.unwrap_or(map.default_longitude),
    );
    let target_distance = TargetDistance::between(args.from, aim);

    let (zoom, zoom_source) = match (args.zoom, target_distance.yards()) {
        (Some(zoom), _) => (zoom, ZoomSource::Explicit),
        (None, Some(yards)) => (suggested_zoom(yards), ZoomSource::Distance),
        (None, None) => (map.default_zoom, ZoomSource::Config),
    };

    let library = ctx.library()?;
    let (club, shots) = club_shots(&library, &args.club.club)?;
    let filter = if args.all_shots {
        ShotFilter::All
    } else {
        ShotFilter::CleanOnly
    };
    let dispersion = ClubDispersion::analyze(&club, &shots, filter);

    let view = MapView {
        zoom,
        center: aim,
        viewport_width: args.width,
        viewport_height: args.height,
    };
    let overlay = MapOverlay::build(
        &dispersion,
        &view,
        map.projection()?,
        ctx.config.chart.contour_points,
    )?;

    output(
        &OverlayReport {
            overlay,
            zoom_source,
            target_distance,
        },
        flags.format,
    )
}
