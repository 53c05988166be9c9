//! Decision records
//!
//! A [`Record`] is assembled with a [`RecordBuilder`], may collect links to
//! other records, and is written exactly once with [`Record::store`]:
//!
//! ```rust,ignore
//! use adr_core::{OsFileSystem, Record, TemplateResolver};
//!
//! let fs = OsFileSystem;
//! let mut record = Record::builder()
//!     .doc_path("doc/adr")
//!     .id(7)
//!     .name("Use PostgreSQL for persistence")
//!     .build()?;
//! record.add_link("4:Supersedes")?;
//! let path = record.store(&fs, &TemplateResolver::with_default_resources(&fs))?;
//! ```

mod naming;
mod render;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::date::DateStyle;
use crate::error::{AdrError, Result};
use crate::fs::FileSystem;
use crate::template::TemplateResolver;

pub use naming::{file_name, format_id, next_id, parse_id, slug, ID_WIDTH};
pub use render::{parse_links, LINKS_HEADING, STATUS_HEADING};

pub const DEFAULT_STATUS: &str = "Proposed";

/// Reference from one record to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub target: u32,
    pub description: String,
}

impl Link {
    /// Parse `<target>:<description>`
    pub fn parse(spec: &str) -> Result<Self> {
        let malformed = |reason| AdrError::MalformedLink {
            spec: spec.to_string(),
            reason,
        };

        let (target, description) = spec
            .split_once(':')
            .ok_or_else(|| malformed("expected <target>:<description>"))?;
        let target = target
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| malformed("target must be a positive record number"))?;

        // One line per link in the rendered document
        Ok(Self {
            target,
            description: description.split_whitespace().collect::<Vec<_>>().join(" "),
        })
    }

    /// Markdown list item pointing at `target_file`
    pub fn render(&self, target_file: &str) -> String {
        format!("* {} [{}]({})", self.description, self.target, target_file)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target, self.description)
    }
}

#[derive(Debug, Clone)]
pub struct Record {
    doc_path: PathBuf,
    id: u32,
    name: String,
    date: NaiveDate,
    status: String,
    template: Option<String>,
    date_style: DateStyle,
    links: Vec<Link>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    doc_path: Option<PathBuf>,
    id: Option<u32>,
    name: Option<String>,
    date: Option<NaiveDate>,
    status: Option<String>,
    template: Option<String>,
    date_style: Option<DateStyle>,
}

impl RecordBuilder {
    /// Directory the record file is written to
    pub fn doc_path(mut self, doc_path: impl Into<PathBuf>) -> Self {
        self.doc_path = Some(doc_path.into());
        self
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// Record title
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Template designator, see [`crate::template`]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn date_style(mut self, style: DateStyle) -> Self {
        self.date_style = Some(style);
        self
    }

    pub fn build(self) -> Result<Record> {
        let doc_path = self
            .doc_path
            .ok_or_else(|| AdrError::validation("a records directory is required"))?;
        let id = self
            .id
            .filter(|id| *id > 0)
            .ok_or_else(|| AdrError::validation("a positive record id is required"))?;
        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AdrError::validation("a record title is required"))?;
        if slug(&name).is_empty() {
            return Err(AdrError::validation(format!(
                "title '{}' has no letters or digits to name the file after",
                name
            )));
        }

        let status = self
            .status
            .map(|status| status.trim().to_string())
            .filter(|status| !status.is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());

        Ok(Record {
            doc_path,
            id,
            name,
            date: self.date.unwrap_or_else(|| Local::now().date_naive()),
            status,
            template: self.template,
            date_style: self.date_style.unwrap_or_default(),
            links: Vec::new(),
        })
    }
}

impl Record {
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    pub fn doc_path(&self) -> &Path {
        &self.doc_path
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// `NNNN-slug.md`
    pub fn file_name(&self) -> String {
        file_name(self.id, &self.name)
    }

    pub fn path(&self) -> PathBuf {
        self.doc_path.join(self.file_name())
    }

    /// Add a link from `<target>:<description>`. The target is not checked
    /// for existence. On error the links are left untouched.
    pub fn add_link(&mut self, spec: &str) -> Result<()> {
        let link = Link::parse(spec)?;
        self.links.push(link);
        Ok(())
    }

    /// Render the record from its template and write it to the records
    /// directory, creating the directory if needed. Nothing is written when
    /// the template cannot be resolved or read.
    pub fn store(&self, fs: &dyn FileSystem, templates: &TemplateResolver<'_>) -> Result<PathBuf> {
        let handle = templates.resolve(self.template.as_deref())?;
        debug!("Rendering record {} from {}", self.id, handle.origin());
        let lines = handle.read_lines()?;

        fs.create_dir_all(&self.doc_path)
            .map_err(|e| AdrError::io("create directory", &self.doc_path, e))?;

        let date = self.date_style.format(self.date);
        let links = self
            .links
            .iter()
            .map(|link| {
                self.link_target_file(fs, link.target)
                    .map(|target_file| (link, target_file))
            })
            .collect::<Result<Vec<_>>>()?;
        let text = render::render(
            lines,
            &render::Substitutions {
                heading: format!("# {}. {}", self.id, self.name),
                date: &date,
                status: &self.status,
                links,
            },
        );

        let path = self.path();
        fs.write(&path, &text)
            .map_err(|e| AdrError::io("write", &path, e))?;
        info!("Stored record {} at {:?}", self.id, path);
        Ok(path)
    }

    /// File name of record `target` in this record's directory, or the bare
    /// padded id when no such record exists yet
    fn link_target_file(&self, fs: &dyn FileSystem, target: u32) -> Result<String> {
        let existing = fs
            .list_dir(&self.doc_path)
            .map_err(|e| AdrError::io("list", &self.doc_path, e))?
            .into_iter()
            .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
            .find(|name| parse_id(name) == Some(target));

        Ok(existing.unwrap_or_else(|| {
            debug!("Link target {} not found in {:?}", target, self.doc_path);
            format!("{}.md", format_id(target))
        }))
    }
}
