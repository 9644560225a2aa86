use anyhow::bail;
use caddie_core::chart::ChartScene;
use caddie_core::ellipse::ClubDispersion;
use caddie_core::shot::ShotSample;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::commands::chart::StatsReport;
use crate::commands::distance::{DistanceReport, ScaleReport};
use crate::commands::ellipse::{ContourReport, EllipseReport};
use crate::commands::overlay::OverlayReport;
use crate::output::output;

pub const SCHEMA_TYPES: [&str; 9] = [
    "chart",
    "contour",
    "dispersion",
    "distance",
    "ellipse",
    "overlay",
    "scale",
    "shot",
    "stats",
];

/// Handle `caddie schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name.to_ascii_lowercase().as_str() {
        "chart" => schema_for!(ChartScene),
        "contour" => schema_for!(ContourReport),
        "dispersion" => schema_for!(ClubDispersion),
        "distance" => schema_for!(DistanceReport),
        "ellipse" => schema_for!(EllipseReport),
        "overlay" => schema_for!(OverlayReport),
        "scale" => schema_for!(ScaleReport),
        "shot" => schema_for!(ShotSample),
        "stats" => schema_for!(StatsReport),
        other => bail!(
            "unknown schema type '{other}'. Expected one of: {}",
            SCHEMA_TYPES.join(", ")
        ),
    };
    output(&schema, flags.format)
}
