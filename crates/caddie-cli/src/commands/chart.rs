use caddie_core::chart::ChartScene;
use caddie_core::enums::ShotFilter;
use caddie_core::stats::ShotStats;
use schemars::JsonSchema;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ChartArgs, ClubArgs};
use crate::commands::shared::club::club_shots;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize, JsonSchema)]
pub struct StatsReport {
    pub club_id: String,
    #[serde(flatten)]
    pub stats: ShotStats,
}

/// Handle `caddie chart`.
pub fn handle_chart(args: &ChartArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let library = ctx.library()?;
    let (club, shots) = club_shots(&library, &args.club.club)?;

    let mut options = ctx.config.chart.scene_options();
    if args.clean_only {
        options.filter = ShotFilter::CleanOnly;
    }
    if let Some(seed) = args.seed {
        options.jitter_seed = seed;
    }

    let scene = ChartScene::build(&club, &shots, ctx.config.chart.layout(), options)?;
    output(&scene, flags.format)
}

/// Handle `caddie stats`.
pub fn handle_stats(args: &ClubArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let library = ctx.library()?;
    let (club_id, shots) = club_shots(&library, &args.club)?;
    output(
        &StatsReport {
            club_id,
            stats: ShotStats::from_shots(&shots),
        },
        flags.format,
    )
}
