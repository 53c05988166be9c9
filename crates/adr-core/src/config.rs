//! Project preferences
//!
//! Stored as TOML in `.adr/adr.toml` at the project root. Every key is
//! optional:
//!
//! ```toml
//! doc_path = "doc/adr"
//! template = "templates/adr.md"
//! initial_template = "rsrc:default_initial_template.md"
//! template_archive = "tools/adr-templates.zip"
//! locale = "en_GB"
//! date_format = "%Y-%m-%d"
//! editor = "code --wait"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::DateStyle;
use crate::error::{AdrError, Result};
use crate::fs::FileSystem;
use crate::paths::{
    config_path, DEFAULT_DOC_PATH, LOCAL_TEMPLATE_FILE, SECONDARY_DOC_PATH,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrConfig {
    /// Records directory, relative to the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_path: Option<PathBuf>,
    /// Designator used for new records when none is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Designator used for the first record written by `init`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_template: Option<String>,
    /// Zip template pack serving bundled resources instead of the built-in ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_archive: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// strftime pattern overriding the locale's long date form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl AdrConfig {
    /// Load the preferences of the project rooted at `root`; a missing file
    /// yields the defaults
    pub fn load(fs: &dyn FileSystem, root: &Path) -> Result<Self> {
        let path = config_path(root);
        if !fs.exists(&path) {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs
            .read_to_string(&path)
            .map_err(|e| AdrError::io("read", &path, e))?;
        toml::from_str(&content).map_err(|source| AdrError::Config { path, source })
    }

    pub fn save(&self, fs: &dyn FileSystem, root: &Path) -> Result<()> {
        let path = config_path(root);
        let content = toml::to_string_pretty(self)?;
        fs.write(&path, &content)
            .map_err(|e| AdrError::io("write", &path, e))
    }

    /// Absolute records directory: the configured `doc_path`, else `root`
    /// itself when it holds a `template.md`, else `docs/adr` when that
    /// exists, else `doc/adr`
    pub fn doc_dir(&self, fs: &dyn FileSystem, root: &Path) -> PathBuf {
        if let Some(doc_path) = &self.doc_path {
            return root.join(doc_path);
        }
        if fs.exists(&root.join(LOCAL_TEMPLATE_FILE)) {
            return root.to_path_buf();
        }
        let secondary = root.join(SECONDARY_DOC_PATH);
        if fs.exists(&secondary) {
            return secondary;
        }
        root.join(DEFAULT_DOC_PATH)
    }

    /// Date style from the configured locale (else `host_locale`) and
    /// `date_format`
    pub fn date_style(&self, host_locale: Option<&str>) -> Result<DateStyle> {
        let style = match self.locale.as_deref().or(host_locale) {
            Some(locale) => DateStyle::for_locale(locale),
            None => DateStyle::default(),
        };
        match &self.date_format {
            Some(pattern) => style.with_pattern(pattern),
            None => Ok(style),
        }
    }
}
