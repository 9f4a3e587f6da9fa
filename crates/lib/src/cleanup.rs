//! Pre-build cleanup of previously generated output.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CleanupError {
  #[error("failed to remove {}: {source}", path.display())]
  Remove { path: PathBuf, source: io::Error },
}

/// Clears generated files from an output directory before a build.
pub trait OutputCleaner {
  /// Removes `path` and everything below it. A missing path is not an error.
  fn clean(&self, path: &Path) -> Result<(), CleanupError>;
}

/// Deletes output directories from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCleaner;

impl OutputCleaner for FsCleaner {
  fn clean(&self, path: &Path) -> Result<(), CleanupError> {
    match fs::remove_dir_all(path) {
      Ok(()) => {
        info!(path = ?path, "cleaned output directory");
        Ok(())
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = ?path, "output directory absent, nothing to clean");
        Ok(())
      }
      Err(source) => Err(CleanupError::Remove {
        path: path.to_path_buf(),
        source,
      }),
    }
  }
}

/// Reports what would be cleaned without touching the disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunCleaner;

impl OutputCleaner for DryRunCleaner {
  fn clean(&self, path: &Path) -> Result<(), CleanupError> {
    info!(path = ?path, "would clean output directory");
    Ok(())
  }
}
