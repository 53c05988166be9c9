//! Subcommand handlers
//!
//! Handlers only see the [`Context`], so they run unchanged against the real
//! disk or an in-memory filesystem.

mod init;
mod list;
mod new;
mod version;

use std::io::Write;
use std::path::PathBuf;

use adr_core::FileSystem;

use crate::editor::EditorRunner;

pub use init::{init, InitArgs};
pub use list::list;
pub use new::{new_record, NewArgs};
pub use version::version;

/// Everything a command may touch
pub struct Context<'a> {
    pub fs: &'a dyn FileSystem,
    /// Directory the tool was invoked from
    pub cwd: PathBuf,
    /// Locale name reported by the host (`LC_ALL`, `LC_TIME` or `LANG`)
    pub host_locale: Option<String>,
    /// Editor from the environment (`VISUAL`, else `EDITOR`)
    pub env_editor: Option<String>,
    pub editor: &'a dyn EditorRunner,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}
