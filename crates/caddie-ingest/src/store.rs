//! JSON persistence for [`ShotLibrary`].

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::IngestError;
use crate::library::ShotLibrary;

/// Reads and writes the library document at a fixed path.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the library. A missing file is an empty library.
    pub fn load(&self) -> Result<ShotLibrary, IngestError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no library file yet");
                return Ok(ShotLibrary::new());
            }
            Err(e) => return Err(IngestError::io(&self.path, e)),
        };
        let library: ShotLibrary = serde_json::from_str(&text)?;
        tracing::debug!(
            path = %self.path.display(),
            shots = library.len(),
            sessions = library.sessions().len(),
            "loaded library"
        );
        Ok(library)
    }

    /// Write the library as pretty JSON.
    ///
    /// The document goes to a temp file in the same directory first and is
    /// renamed over the target, so readers never see a partial write.
    pub fn save(&self, library: &ShotLibrary) -> Result<(), IngestError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| IngestError::io(dir, e))?;

        let json = serde_json::to_string_pretty(library)?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| IngestError::io(dir, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|e| IngestError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| IngestError::io(&self.path, e.error))?;

        tracing::debug!(path = %self.path.display(), shots = library.len(), "saved library");
        Ok(())
    }
}
