//! adr-core
//!
//! Architecture decision records: numbered markdown documents kept in a
//! project-local directory.
//!
//! - [`root`]: find the project root by its `.adr` marker directory
//! - [`template`]: resolve the text a new record is seeded from
//! - [`record`]: number, name, render and store a record
//! - [`project`]: preferences and records directory of an initialised project
//!
//! All storage goes through the [`FileSystem`] passed in by the caller.

pub mod config;
pub mod date;
pub mod error;
pub mod fs;
pub mod paths;
pub mod project;
pub mod record;
pub mod root;
pub mod template;

pub use config::AdrConfig;
pub use date::DateStyle;
pub use error::{AdrError, Result};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use project::{Project, RecordSummary, INITIAL_RECORD_TITLE};
pub use record::{Link, Record, RecordBuilder};
pub use root::locate_root;
pub use template::{TemplateDesignator, TemplateHandle, TemplateResolver};
