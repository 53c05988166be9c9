//! An initialised ADR project: its root, preferences and records directory

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::AdrConfig;
use crate::error::{AdrError, Result};
use crate::fs::FileSystem;
use crate::paths::marker_dir;
use crate::record::{next_id, parse_id, Record, RecordBuilder};
use crate::root::locate_root;
use crate::template::{
    default_resources, ArchiveResources, BundledResources, TemplateResolver,
    DEFAULT_INITIAL_TEMPLATE_NAME, RESOURCE_PREFIX,
};

/// Title of the record written by [`Project::init`]
pub const INITIAL_RECORD_TITLE: &str = "Record architecture decisions";

/// An existing record file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub id: u32,
    pub path: PathBuf,
}

pub struct Project<'a> {
    fs: &'a dyn FileSystem,
    root: PathBuf,
    config: AdrConfig,
}

impl<'a> Project<'a> {
    /// Mark `dir` as a project root and create its records directory.
    ///
    /// Fails if `dir` is already initialised. `doc_path` defaults to
    /// `doc/adr`; `template` becomes the default template for new records.
    pub fn init(
        fs: &'a dyn FileSystem,
        dir: &Path,
        doc_path: Option<&Path>,
        template: Option<&str>,
    ) -> Result<Self> {
        let marker = marker_dir(dir);
        if fs.exists(&marker) {
            return Err(AdrError::AlreadyInitialised(dir.to_path_buf()));
        }
        fs.create_dir_all(&marker)
            .map_err(|e| AdrError::io("create directory", &marker, e))?;

        let config = AdrConfig {
            doc_path: Some(
                doc_path
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(crate::paths::DEFAULT_DOC_PATH)),
            ),
            template: template.map(str::to_string),
            ..Default::default()
        };
        config.save(fs, dir)?;

        let project = Self {
            fs,
            root: dir.to_path_buf(),
            config,
        };
        let doc_dir = project.doc_dir();
        fs.create_dir_all(&doc_dir)
            .map_err(|e| AdrError::io("create directory", &doc_dir, e))?;
        info!("Initialised ADR project at {:?}", dir);
        Ok(project)
    }

    /// Locate the project containing `start` and load its preferences
    pub fn open(fs: &'a dyn FileSystem, start: &Path) -> Result<Self> {
        let root = locate_root(fs, start)?;
        let config = AdrConfig::load(fs, &root)?;
        Ok(Self { fs, root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &AdrConfig {
        &self.config
    }

    pub fn doc_dir(&self) -> PathBuf {
        self.config.doc_dir(self.fs, &self.root)
    }

    pub fn next_id(&self) -> Result<u32> {
        next_id(self.fs, &self.doc_dir())
    }

    /// Existing records, ordered by id
    pub fn records(&self) -> Result<Vec<RecordSummary>> {
        let doc_dir = self.doc_dir();
        if !self.fs.exists(&doc_dir) {
            return Ok(Vec::new());
        }

        let mut records: Vec<_> = self
            .fs
            .list_dir(&doc_dir)
            .map_err(|e| AdrError::io("list", &doc_dir, e))?
            .into_iter()
            .filter_map(|path| {
                let id = parse_id(path.file_name()?.to_str()?)?;
                Some(RecordSummary { id, path })
            })
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.path.cmp(&b.path)));
        Ok(records)
    }

    /// Builder for the next record, carrying the records directory, the next
    /// id and the configured template. Relative template paths are taken
    /// from the project root.
    pub fn record_builder(&self, title: &str) -> Result<RecordBuilder> {
        let mut builder = Record::builder()
            .doc_path(self.doc_dir())
            .id(self.next_id()?)
            .name(title);
        if let Some(template) = &self.config.template {
            builder = builder.template(self.anchor_template(template));
        }
        Ok(builder)
    }

    /// Designator for the first record of a fresh project
    pub fn initial_template(&self) -> String {
        match &self.config.initial_template {
            Some(template) => self.anchor_template(template),
            None => format!("{}{}", RESOURCE_PREFIX, DEFAULT_INITIAL_TEMPLATE_NAME),
        }
    }

    /// Resolver serving bundled resources from the configured template pack,
    /// or from the build-configured backend
    pub fn templates(&self) -> TemplateResolver<'a> {
        let resources: Box<dyn BundledResources> = match &self.config.template_archive {
            Some(archive) => Box::new(ArchiveResources::new(self.root.join(archive))),
            None => default_resources(),
        };
        TemplateResolver::new(self.fs, resources)
    }

    fn anchor_template(&self, designator: &str) -> String {
        if designator.starts_with(RESOURCE_PREFIX) || Path::new(designator).is_absolute() {
            designator.to_string()
        } else {
            self.root.join(designator).display().to_string()
        }
    }
}
