//! Centralized path constants
//!
//! All reserved names of the on-disk layout in one place

use std::path::{Path, PathBuf};

/// Marker directory identifying a project root
pub const ADR_DIR_NAME: &str = ".adr";

/// Preferences file inside the marker directory
pub const CONFIG_FILE_NAME: &str = "adr.toml";

/// Records directory used when nothing else is configured or detected
pub const DEFAULT_DOC_PATH: &str = "doc/adr";

/// Alternative records directory picked up when it already exists
pub const SECONDARY_DOC_PATH: &str = "docs/adr";

/// A `template.md` at the root means the tool runs inside the records directory
pub const LOCAL_TEMPLATE_FILE: &str = "template.md";

/// Marker directory of the project rooted at `root`
pub fn marker_dir(root: &Path) -> PathBuf {
    root.join(ADR_DIR_NAME)
}

/// Preferences file of the project rooted at `root` (`<root>/.adr/adr.toml`)
pub fn config_path(root: &Path) -> PathBuf {
    marker_dir(root).join(CONFIG_FILE_NAME)
}
