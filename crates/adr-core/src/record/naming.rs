//! Identifier formatting, title slugs and record numbering

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{AdrError, Result};
use crate::fs::FileSystem;

/// Identifiers are zero-padded to this many digits
pub const ID_WIDTH: usize = 4;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

static RECORD_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)-.*\.md$").unwrap());

/// `7` -> `0007`; wider identifiers keep their natural width
pub fn format_id(id: u32) -> String {
    format!("{:0width$}", id, width = ID_WIDTH)
}

/// Lower-kebab-case form of a title
pub fn slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

pub fn file_name(id: u32, title: &str) -> String {
    format!("{}-{}.md", format_id(id), slug(title))
}

/// Identifier encoded in a record file name, if it is one
pub fn parse_id(file_name: &str) -> Option<u32> {
    RECORD_FILE
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}

/// `max(existing) + 1`, or 1 for an empty or missing directory. Gaps are not
/// reused.
pub fn next_id(fs: &dyn FileSystem, doc_dir: &Path) -> Result<u32> {
    if !fs.exists(doc_dir) {
        return Ok(1);
    }

    let highest = fs
        .list_dir(doc_dir)
        .map_err(|e| AdrError::io("list", doc_dir, e))?
        .iter()
        .filter_map(|path| path.file_name()?.to_str().and_then(parse_id))
        .max()
        .unwrap_or(0);

    debug!("Highest record id in {:?} is {}", doc_dir, highest);
    highest
        .checked_add(1)
        .ok_or_else(|| AdrError::validation("record identifiers exhausted"))
}
