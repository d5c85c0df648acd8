//! Ephemeral synthesized-audio artifact store
//!
//! The presentation layer plays audio from one fixed local path; each
//! synthesis overwrites the previous clip. Nothing else is persisted.

use std::io;
use std::path::{Path, PathBuf};

use domain::AudioClip;
use tracing::debug;

/// Writes the latest synthesized clip to a fixed local path
#[derive(Debug, Clone)]
pub struct AudioArtifactStore {
    path: PathBuf,
}

impl AudioArtifactStore {
    /// Create a store writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The fixed artifact path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the artifact with `clip` and return its path
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub fn write_latest(&self, clip: &AudioClip) -> io::Result<PathBuf> {
        std::fs::write(&self.path, clip.data())?;
        debug!(path = %self.path.display(), audio_size = clip.size_bytes(), "Audio artifact written");
        Ok(self.path.clone())
    }
}
