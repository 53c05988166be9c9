//! Template packs: bundled resources packed in a zip archive
//!
//! An archive is opened the first time one of its templates is requested and
//! the session stays open for the rest of the process. Later requests for the
//! same archive reuse it.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use super::{BundledResources, TemplateHandle};
use crate::error::{AdrError, Result};

type Session = Arc<Mutex<ZipArchive<File>>>;

/// Open archive sessions keyed by canonical archive path
static SESSIONS: Lazy<Mutex<HashMap<PathBuf, Session>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Directory inside the archive searched when a name is not at its top level
const ARCHIVE_TEMPLATE_DIR: &str = "templates";

fn session(archive: &Path) -> Result<Session> {
    let key = archive
        .canonicalize()
        .map_err(|e| AdrError::io("open template archive", archive, e))?;

    let mut sessions = SESSIONS.lock();
    if let Some(existing) = sessions.get(&key) {
        return Ok(Arc::clone(existing));
    }

    debug!("Opening template archive {:?}", key);
    let file = File::open(&key).map_err(|e| AdrError::io("open template archive", &key, e))?;
    let zip = ZipArchive::new(file).map_err(|source| AdrError::Archive {
        path: key.clone(),
        source,
    })?;

    let session = Arc::new(Mutex::new(zip));
    sessions.insert(key, Arc::clone(&session));
    Ok(session)
}

#[derive(Debug, Clone)]
pub struct ArchiveResources {
    archive: PathBuf,
}

impl ArchiveResources {
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
        }
    }
}

impl BundledResources for ArchiveResources {
    fn open(&self, name: &str) -> Result<TemplateHandle> {
        let session = session(&self.archive)?;
        let mut zip = session.lock();

        let nested = format!("{}/{}", ARCHIVE_TEMPLATE_DIR, name);
        let entry_name = [name, nested.as_str()]
            .into_iter()
            .find(|candidate| zip.index_for_name(candidate).is_some())
            .ok_or_else(|| AdrError::ResourceNotFound(name.to_string()))?
            .to_string();

        let mut entry = zip.by_name(&entry_name).map_err(|source| match source {
            ZipError::FileNotFound => AdrError::ResourceNotFound(name.to_string()),
            source => AdrError::Archive {
                path: self.archive.clone(),
                source,
            },
        })?;

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| AdrError::io("read template archive", &self.archive, e))?;

        Ok(TemplateHandle::from_bytes(
            format!("{}!/{}", self.archive.display(), entry_name),
            bytes,
        ))
    }
}
