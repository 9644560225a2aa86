use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Import(args) => commands::import::handle(&args, ctx, flags),
        Commands::Clubs => commands::library::handle_clubs(ctx, flags),
        Commands::Sessions => commands::library::handle_sessions(ctx, flags),
        Commands::Reset(args) => commands::library::handle_reset(&args, ctx, flags),
        Commands::Ellipse(args) => commands::ellipse::handle_ellipse(&args, ctx, flags),
        Commands::Contour(args) => commands::ellipse::handle_contour(&args, ctx, flags),
        Commands::Chart(args) => commands::chart::handle_chart(&args, ctx, flags),
        Commands::Stats(args) => commands::chart::handle_stats(&args, ctx, flags),
        Commands::Overlay(args) => commands::overlay::handle(&args, ctx, flags),
        Commands::Distance(_) | Commands::Scale(_) | Commands::Schema(_) => {
            unreachable!("distance/scale/schema are pre-dispatched in main")
        }
    }
}
