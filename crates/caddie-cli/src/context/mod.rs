use std::path::PathBuf;

use anyhow::Context;
use caddie_config::CaddieConfig;
use caddie_ingest::{LibraryStore, ShotLibrary};

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: CaddieConfig,
    pub store: LibraryStore,
}

impl AppContext {
    /// Resolve the library location from `--data` or `general.data_path`.
    pub fn init(config: CaddieConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let path = match &flags.data {
            Some(path) => PathBuf::from(path),
            None => config
                .general
                .library_path()
                .context("failed to resolve shot library path")?,
        };
        tracing::debug!(path = %path.display(), "using shot library");
        Ok(Self {
            config,
            store: LibraryStore::new(path),
        })
    }

    pub fn library(&self) -> anyhow::Result<ShotLibrary> {
        self.store.load().with_context(|| {
            format!("failed to load shot library at {}", self.store.path().display())
        })
    }

    pub fn save(&self, library: &ShotLibrary) -> anyhow::Result<()> {
        self.store.save(library).with_context(|| {
            format!("failed to save shot library at {}", self.store.path().display())
        })
    }
}
