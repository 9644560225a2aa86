use anyhow::{Context, bail};
use caddie_ingest::LibraryStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResetArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ClubRow {
    pub club: String,
    pub shots: usize,
    pub clean: usize,
    pub mishits: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionRow {
    pub session: String,
    pub shots: usize,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub removed_shots: usize,
    pub removed_sessions: usize,
    pub restored_shots: usize,
    pub restored_sessions: usize,
}

/// Handle `caddie clubs`.
pub fn handle_clubs(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = ctx
        .library()?
        .by_club()
        .into_iter()
        .map(|(club, shots)| {
            let clean = shots.iter().filter(|s| s.is_clean()).count();
            ClubRow {
                club,
                shots: shots.len(),
                clean,
                mishits: shots.len() - clean,
            }
        })
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}

/// Handle `caddie sessions`.
pub fn handle_sessions(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = ctx
        .library()?
        .session_counts()
        .into_iter()
        .map(|(session, shots)| SessionRow { session, shots })
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}

/// Handle `caddie reset`.
///
/// Without `--baseline` the library is emptied. With it, the library is
/// replaced by the baseline document, which must exist.
pub fn handle_reset(args: &ResetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut library = ctx.library()?;
    let removed_shots = library.len();
    let removed_sessions = library.sessions().len();

    match &args.baseline {
        Some(path) => {
            if !path.is_file() {
                bail!("baseline library not found: {}", path.display());
            }
            let baseline = LibraryStore::new(path)
                .load()
                .with_context(|| format!("failed to load baseline {}", path.display()))?;
            library.reset_to(baseline);
        }
        None => library.reset(),
    }
    ctx.save(&library)?;

    let response = ResetResponse {
        removed_shots,
        removed_sessions,
        restored_shots: library.len(),
        restored_sessions: library.sessions().len(),
    };
    tracing::info!(removed = removed_shots, restored = response.restored_shots, "shot library reset");
    output(&response, flags.format)
}

#[cfg(test)]
mod tests {
    use caddie_config::CaddieConfig;
    use caddie_core::enums::ShotType;
    use caddie_core::shot::{LaunchMetrics, ShotSample};
    use caddie_ingest::ShotLibrary;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags_for(dir: &TempDir) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
            verbose: false,
            data: Some(dir.path().join("shots.json").to_string_lossy().into_owned()),
        }
    }

    fn lob_wedge(session: &str, n: u32) -> ShotSample {
        ShotSample {
            club_id: "LW".into(),
            session_id: session.into(),
            shot_number: Some(n),
            lateral_offset_yards: 0.5,
            carry_distance_yards: 88.8,
            shot_type: ShotType::Clean,
            metrics: LaunchMetrics::default(),
        }
    }

    #[test]
    fn reset_clears_saved_library() {
        let dir = TempDir::new().expect("tempdir");
        let flags = GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
            verbose: false,
            data: Some(dir.path().join("shots.json").to_string_lossy().into_owned()),
        };
        let ctx = AppContext::init(CaddieConfig::default(), &flags).expect("context");

        let mut library = ShotLibrary::new();
        library.merge(
            "Jan",
            vec![ShotSample {
                club_id: "LW".into(),
                session_id: "Jan".into(),
                shot_number: Some(1),
                lateral_offset_yards: 0.5,
                carry_distance_yards: 88.8,
                shot_type: ShotType::Clean,
                metrics: LaunchMetrics::default(),
            }],
        );
        ctx.save(&library).expect("save");

        handle_clubs(&ctx, &flags).expect("clubs");
        handle_reset(&ResetArgs { baseline: None }, &ctx, &flags).expect("reset");

        let reloaded = ctx.library().expect("library");
        assert!(reloaded.is_empty());
        assert!(reloaded.sessions().is_empty());
    }

    #[test]
    fn reset_restores_baseline_library() {
        let dir = TempDir::new().expect("tempdir");
        let flags = flags_for(&dir);
        let ctx = AppContext::init(CaddieConfig::default(), &flags).expect("context");

        let mut working = ShotLibrary::new();
        working.merge("Jan", vec![lob_wedge("Jan", 1), lob_wedge("Jan", 2)]);
        ctx.save(&working).expect("save");

        let baseline_path = dir.path().join("baseline.json");
        let mut baseline = ShotLibrary::new();
        baseline.merge("Baseline", vec![lob_wedge("Baseline", 1)]);
        LibraryStore::new(&baseline_path).save(&baseline).expect("save baseline");

        let args = ResetArgs {
            baseline: Some(baseline_path),
        };
        handle_reset(&args, &ctx, &flags).expect("reset");

        assert_eq!(ctx.library().expect("library"), baseline);
    }

    #[test]
    fn reset_with_missing_baseline_keeps_library() {
        let dir = TempDir::new().expect("tempdir");
        let flags = flags_for(&dir);
        let ctx = AppContext::init(CaddieConfig::default(), &flags).expect("context");

        let mut working = ShotLibrary::new();
        working.merge("Jan", vec![lob_wedge("Jan", 1)]);
        ctx.save(&working).expect("save");

        let args = ResetArgs {
            baseline: Some(dir.path().join("missing.json")),
        };
        let err = handle_reset(&args, &ctx, &flags).unwrap_err();
        assert!(err.to_string().contains("baseline library not found"));
        assert_eq!(ctx.library().expect("library"), working);
    }
}
