//! Bundled template backends

use std::path::{Path, PathBuf};

use tracing::debug;

use super::TemplateHandle;
use crate::error::{AdrError, Result};

/// Source of templates shipped with the tool
pub trait BundledResources: Send + Sync {
    fn open(&self, name: &str) -> Result<TemplateHandle>;
}

/// Templates compiled into the binary.
///
/// At compile time, rust-embed includes every file under `templates/`.
#[cfg(feature = "embedded-templates")]
#[derive(rust_embed::Embed)]
#[folder = "templates/"]
struct BundledTemplates;

#[cfg(feature = "embedded-templates")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

#[cfg(feature = "embedded-templates")]
impl BundledResources for EmbeddedResources {
    fn open(&self, name: &str) -> Result<TemplateHandle> {
        let file = <BundledTemplates as rust_embed::Embed>::get(name)
            .ok_or_else(|| AdrError::ResourceNotFound(name.to_string()))?;
        Ok(TemplateHandle::from_bytes(
            format!("embedded:{}", name),
            file.data.into_owned(),
        ))
    }
}

/// Templates kept as loose files in a directory of the host filesystem
#[derive(Debug, Clone)]
pub struct LooseResources {
    dir: PathBuf,
}

impl LooseResources {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The `templates/` directory shipped next to this crate's sources
    pub fn source_tree() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BundledResources for LooseResources {
    fn open(&self, name: &str) -> Result<TemplateHandle> {
        // Resource names are flat file names
        if name.is_empty() || name.contains("..") || Path::new(name).is_absolute() {
            return Err(AdrError::ResourceNotFound(name.to_string()));
        }

        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(AdrError::ResourceNotFound(name.to_string()));
        }

        debug!("Reading loose template {:?}", path);
        let bytes = std::fs::read(&path).map_err(|e| AdrError::io("read template", &path, e))?;
        Ok(TemplateHandle::from_bytes(path.display().to_string(), bytes))
    }
}

/// Backend chosen by build configuration: embedded assets when the
/// `embedded-templates` feature is on, the source tree's loose files otherwise.
pub fn default_resources() -> Box<dyn BundledResources> {
    #[cfg(feature = "embedded-templates")]
    {
        Box::new(EmbeddedResources)
    }
    #[cfg(not(feature = "embedded-templates"))]
    {
        Box::new(LooseResources::source_tree())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{DEFAULT_INITIAL_TEMPLATE_NAME, DEFAULT_TEMPLATE_NAME};
    use tempfile::tempdir;

    #[test]
    fn default_backend_serves_both_shipped_templates() {
        let resources = default_resources();
        for name in [DEFAULT_TEMPLATE_NAME, DEFAULT_INITIAL_TEMPLATE_NAME] {
            let lines = resources.open(name).unwrap().read_lines().unwrap();
            assert_eq!(lines[0], "# NUMBER. TITLE");
            assert!(lines.iter().any(|l| l.contains("{{date}}")));
            assert!(lines.iter().any(|l| l == "## Status"));
        }
    }

    #[test]
    fn default_backend_reports_unknown_names() {
        let err = default_resources().open("no_such_template.md").unwrap_err();
        assert!(matches!(err, AdrError::ResourceNotFound(_)));
    }

    #[test]
    fn loose_and_default_backends_agree() {
        let loose = LooseResources::source_tree()
            .open(DEFAULT_TEMPLATE_NAME)
            .unwrap()
            .read_lines()
            .unwrap();
        let default = default_resources()
            .open(DEFAULT_TEMPLATE_NAME)
            .unwrap()
            .read_lines()
            .unwrap();
        assert_eq!(loose, default);
    }

    #[test]
    fn loose_resources_stay_inside_their_directory() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("mine.md"), "# mine\n").unwrap();
        let resources = LooseResources::new(temp.path().join("sub"));
        std::fs::create_dir_all(resources.dir()).unwrap();

        assert!(resources.open("../mine.md").is_err());
        assert!(LooseResources::new(temp.path()).open("mine.md").is_ok());
    }
}
