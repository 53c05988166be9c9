//! adr - architecture decision records from the command line
//!
//! - `adr init [DIR]` marks the current directory as a project and writes the
//!   first record
//! - `adr new TITLE...` writes the next record and opens it in an editor
//! - `adr list` prints the existing records

use std::path::PathBuf;

use adr_core::OsFileSystem;
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod editor;

use commands::{Context, InitArgs, NewArgs};
use editor::{choose_editor, ProcessEditor};

/// Manage architecture decision records
#[derive(Parser)]
#[command(name = "adr", version)]
#[command(about = "Manage architecture decision records", long_about = None)]
struct Cli {
    /// Log what the tool is doing (see also ADR_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialise the directory of architecture decision records
    ///
    /// Creates the `.adr` marker in the current directory, the records
    /// directory (default `doc/adr`), and the first record, recording the
    /// decision to record architectural decisions with ADRs.
    Init(InitArgs),

    /// Create a new, numbered ADR and open it in the editor
    New(NewArgs),

    /// List the ADRs of the project
    List,

    /// Print the version of adr
    Version,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("ADR_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn host_locale() -> Option<String> {
    ["LC_ALL", "LC_TIME", "LANG"].into_iter().find_map(env_var)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd: PathBuf = std::env::current_dir().context("Cannot determine the current directory")?;
    let visual = env_var("VISUAL");
    let editor_var = env_var("EDITOR");
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    let mut ctx = Context {
        fs: &OsFileSystem,
        cwd,
        host_locale: host_locale(),
        env_editor: choose_editor(None, visual.as_deref(), editor_var.as_deref()),
        editor: &ProcessEditor,
        out: &mut stdout,
        err: &mut stderr,
    };

    match cli.command {
        Commands::Init(args) => commands::init(&mut ctx, args),
        Commands::New(args) => commands::new_record(&mut ctx, args),
        Commands::List => commands::list(&mut ctx),
        Commands::Version => commands::version(&mut ctx),
    }
}
