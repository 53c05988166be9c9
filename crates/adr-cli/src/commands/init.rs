use std::path::PathBuf;

use adr_core::{Project, INITIAL_RECORD_TITLE};
use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use super::Context;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Records directory, relative to the current directory [default: doc/adr]
    pub directory: Option<PathBuf>,

    /// Template used for new records
    #[arg(short, long)]
    pub template: Option<String>,
}

/// Initialise the current directory: create `.adr`, the records directory,
/// and the first record documenting the decision to keep ADRs.
pub fn init(ctx: &mut Context<'_>, args: InitArgs) -> Result<()> {
    if ctx.env_editor.is_none() {
        writeln!(
            ctx.err,
            "WARNING: Editor for the ADR has not been found in the environment variables.\n\
             Have you set the environment variable EDITOR or VISUAL with the editor program you want to use?"
        )?;
    }

    let project = Project::init(
        ctx.fs,
        &ctx.cwd,
        args.directory.as_deref(),
        args.template.as_deref(),
    )
    .context("Unable to initialise")?;

    writeln!(ctx.out, "Creating ADR directory at {}", project.doc_dir().display())?;

    let style = project.config().date_style(ctx.host_locale.as_deref())?;
    let record = project
        .record_builder(INITIAL_RECORD_TITLE)?
        .template(project.initial_template())
        .date_style(style)
        .status("Accepted")
        .build()?;
    let path = record
        .store(ctx.fs, &project.templates())
        .context("Unable to write the first record")?;

    info!("Initialised project at {:?}", project.root());
    writeln!(ctx.out, "{}", path.display())?;
    Ok(())
}
