use anyhow::Context;
use caddie_core::contour::Contour;
use caddie_core::ellipse::{ClubDispersion, EllipseParameters};
use caddie_core::enums::{ConfidenceLevel, ShotFilter};
use caddie_core::geometry::Point2;
use schemars::JsonSchema;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ContourArgs, EllipseArgs};
use crate::commands::shared::club::club_shots;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize, JsonSchema)]
pub struct EllipseReport {
    pub club_id: String,
    pub filter: ShotFilter,
    pub sample_count: usize,
    /// Empty when fewer than two distinct shots were fitted.
    pub ellipses: Vec<EllipseRow>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct EllipseRow {
    #[serde(flatten)]
    pub ellipse: EllipseParameters,
    pub rotation_degrees: f64,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ContourRing {
    pub confidence: ConfidenceLevel,
    pub ellipse: EllipseParameters,
    /// First point is not repeated at the end.
    pub points: Vec<Point2>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ContourReport {
    pub club_id: String,
    pub points_per_ring: usize,
    pub rings: Vec<ContourRing>,
}

fn analyze(args: &EllipseArgs, ctx: &AppContext) -> anyhow::Result<ClubDispersion> {
    let library = ctx.library()?;
    let (club, shots) = club_shots(&library, &args.club.club)?;
    let filter = if args.all_shots {
        ShotFilter::All
    } else {
        ShotFilter::CleanOnly
    };
    let dispersion = ClubDispersion::analyze(&club, &shots, filter);
    if dispersion.p95.is_none() {
        tracing::warn!(
            club = %club,
            samples = dispersion.sample_count,
            "not enough distinct shots to fit a dispersion ellipse"
        );
    }
    Ok(dispersion)
}

fn selected<'a>(
    dispersion: &'a ClubDispersion,
    args: &EllipseArgs,
) -> impl Iterator<Item = &'a EllipseParameters> {
    args.confidence
        .levels()
        .iter()
        .filter_map(|level| dispersion.get(*level))
}

/// Handle `caddie ellipse`.
pub fn handle_ellipse(args: &EllipseArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let dispersion = analyze(args, ctx)?;
    let ellipses = selected(&dispersion, args)
        .map(|e| EllipseRow {
            ellipse: *e,
            rotation_degrees: e.rotation_degrees(),
        })
        .collect();
    output(
        &EllipseReport {
            club_id: dispersion.club_id.clone(),
            filter: dispersion.filter,
            sample_count: dispersion.sample_count,
            ellipses,
        },
        flags.format,
    )
}

/// Handle `caddie contour`.
pub fn handle_contour(args: &ContourArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let points = args.points.unwrap_or(ctx.config.chart.contour_points);
    let dispersion = analyze(&args.ellipse, ctx)?;
    let rings = selected(&dispersion, &args.ellipse)
        .map(|e| {
            Contour::new(e, points).map(|c| ContourRing {
                confidence: e.confidence,
                ellipse: *e,
                points: c.points().collect(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .context("invalid contour request")?;
    output(
        &ContourReport {
            club_id: dispersion.club_id.clone(),
            points_per_ring: points,
            rings,
        },
        flags.format,
    )
}
