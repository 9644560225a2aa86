use std::path::PathBuf;

use anyhow::Context;
use caddie_ingest::{ImportBatch, MergePreview, ParseOptions, SkippedRow, read_csv_file};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub file: PathBuf,
    pub parsed: usize,
    pub skipped: Vec<SkippedRow>,
    #[serde(flatten)]
    pub merge: MergePreview,
    pub dry_run: bool,
    pub library_shots: usize,
}

/// Handle `caddie import`.
pub fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let options = ParseOptions {
        flip_offline_sign: ctx.config.ingest.flip_offline_sign && !args.keep_offline_sign,
    };
    let ImportBatch {
        session,
        shots,
        skipped,
    } = read_csv_file(&args.csv, args.session.as_deref(), options)
        .with_context(|| format!("failed to import {}", args.csv.display()))?;
    let parsed = shots.len();

    let mut library = ctx.library()?;
    let merge = if args.dry_run {
        library.preview(&session, &shots)
    } else {
        let merge = library.merge(&session, shots);
        ctx.save(&library)?;
        merge
    };

    output(
        &ImportResponse {
            file: args.csv.clone(),
            parsed,
            skipped,
            merge,
            dry_run: args.dry_run,
            library_shots: library.len(),
        },
        flags.format,
    )
}
