//! Project root discovery

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AdrError, Result};
use crate::fs::FileSystem;
use crate::paths::marker_dir;

/// Walk from `start` up through its ancestors until one contains the marker
/// directory, and return that ancestor.
pub fn locate_root(fs: &dyn FileSystem, start: &Path) -> Result<PathBuf> {
    for candidate in start.ancestors() {
        if fs.exists(&marker_dir(candidate)) {
            debug!("Found project root at {:?}", candidate);
            return Ok(candidate.to_path_buf());
        }
    }

    Err(AdrError::RootPathNotFound(start.to_path_buf()))
}
