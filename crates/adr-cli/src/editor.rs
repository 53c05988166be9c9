//! Opening a freshly written record in the user's editor

use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

/// Launches an editor on a file and waits for it to exit
pub trait EditorRunner {
    fn open(&self, editor: &str, path: &Path) -> Result<()>;
}

/// Runs the editor as a child process
pub struct ProcessEditor;

impl EditorRunner for ProcessEditor {
    fn open(&self, editor: &str, path: &Path) -> Result<()> {
        let (program, args) = split_command(editor)?;
        let program_path =
            which::which(&program).with_context(|| format!("Editor '{}' not found", program))?;

        info!("Opening {:?} with {:?}", path, program_path);
        let status = Command::new(&program_path)
            .args(&args)
            .arg(path)
            .status()
            .with_context(|| format!("Failed to launch editor '{}'", program))?;

        if !status.success() {
            bail!("Editor '{}' exited with {}", program, status);
        }
        Ok(())
    }
}

/// Split an editor command line such as `code --wait` into program and
/// arguments
fn split_command(editor: &str) -> Result<(String, Vec<String>)> {
    let mut words = shell_words::split(editor)
        .with_context(|| format!("Cannot parse editor command '{}'", editor))?
        .into_iter();
    let program = words
        .next()
        .ok_or_else(|| anyhow!("Editor command is empty"))?;
    Ok((program, words.collect()))
}

/// Editor preference: the configured one, else `VISUAL`, else `EDITOR`
pub fn choose_editor(configured: Option<&str>, visual: Option<&str>, editor: Option<&str>) -> Option<String> {
    [configured, visual, editor]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .map(str::to_string)
}
