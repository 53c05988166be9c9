//! Template resolution
//!
//! A template designator selects the text used to seed a new record:
//!
//! - absent: the built-in default template, a bundled resource
//! - `rsrc:<name>`: the bundled resource `<name>`
//! - anything else: a literal path on the [`FileSystem`]
//!
//! Bundled resources come from a [`BundledResources`] backend. Which backend
//! serves them is decided by build configuration (see [`default_resources`])
//! or by an explicitly configured template pack ([`ArchiveResources`]), never
//! by looking at the designator.

mod archive;
mod bundled;

use std::fmt;
use std::io::{self, BufRead, Cursor};
use std::path::Path;

use tracing::debug;

use crate::error::{AdrError, Result};
use crate::fs::FileSystem;

pub use archive::ArchiveResources;
#[cfg(feature = "embedded-templates")]
pub use bundled::EmbeddedResources;
pub use bundled::{default_resources, BundledResources, LooseResources};

/// Prefix marking a designator as a bundled resource name
pub const RESOURCE_PREFIX: &str = "rsrc:";

/// Placeholder substituted with the record date
pub const DATE_PLACEHOLDER: &str = "{{date}}";

/// Template used when no designator is given
pub const DEFAULT_TEMPLATE_NAME: &str = "default_template.md";

/// Template used for the first record written by `init`
pub const DEFAULT_INITIAL_TEMPLATE_NAME: &str = "default_initial_template.md";

/// Parsed form of a template designator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateDesignator<'a> {
    Default,
    File(&'a Path),
    Resource(&'a str),
}

impl<'a> TemplateDesignator<'a> {
    pub fn parse(designator: Option<&'a str>) -> Self {
        match designator {
            None => TemplateDesignator::Default,
            Some(value) => match value.strip_prefix(RESOURCE_PREFIX) {
                Some(name) => TemplateDesignator::Resource(name),
                None => TemplateDesignator::File(Path::new(value)),
            },
        }
    }
}

/// Readable sequence of template lines
///
/// Owned by the caller that resolved it. Iterating yields lines without their
/// terminators.
pub struct TemplateHandle {
    origin: String,
    reader: Box<dyn BufRead + Send>,
}

impl TemplateHandle {
    pub fn from_bytes(origin: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            origin: origin.into(),
            reader: Box::new(Cursor::new(bytes.into())),
        }
    }

    /// Where the text came from, for diagnostics
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Consume the handle and collect every line
    pub fn read_lines(self) -> Result<Vec<String>> {
        let origin = self.origin.clone();
        self.collect::<io::Result<Vec<_>>>()
            .map_err(|e| AdrError::io("read template", origin, e))
    }
}

impl Iterator for TemplateHandle {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(Ok(line))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl fmt::Debug for TemplateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateHandle")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Resolves template designators to readable handles
pub struct TemplateResolver<'a> {
    fs: &'a dyn FileSystem,
    resources: Box<dyn BundledResources>,
    default_name: String,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, resources: Box<dyn BundledResources>) -> Self {
        Self {
            fs,
            resources,
            default_name: DEFAULT_TEMPLATE_NAME.to_string(),
        }
    }

    /// Resolver backed by the build-configured bundled resources
    pub fn with_default_resources(fs: &'a dyn FileSystem) -> Self {
        Self::new(fs, default_resources())
    }

    /// Bundled resource served for an absent designator
    pub fn default_template(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    pub fn resolve(&self, designator: Option<&str>) -> Result<TemplateHandle> {
        match TemplateDesignator::parse(designator) {
            TemplateDesignator::Default => {
                debug!("Using default template {}", self.default_name);
                self.resources.open(&self.default_name)
            }
            TemplateDesignator::Resource(name) => {
                debug!("Using bundled template {}", name);
                self.resources.open(name)
            }
            TemplateDesignator::File(path) => {
                if !self.fs.exists(path) {
                    return Err(AdrError::FileNotFound(path.to_path_buf()));
                }
                debug!("Using template file {:?}", path);
                let text = self
                    .fs
                    .read_to_string(path)
                    .map_err(|e| AdrError::io("read template", path, e))?;
                Ok(TemplateHandle::from_bytes(
                    path.display().to_string(),
                    text.into_bytes(),
                ))
            }
        }
    }
}
