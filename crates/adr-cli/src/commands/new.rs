use std::path::Path;

use adr_core::template::RESOURCE_PREFIX;
use adr_core::Project;
use anyhow::{Context as _, Result};
use clap::Args;

use super::Context;
use crate::editor::choose_editor;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Title of the decision
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,

    /// Template file, or `rsrc:<name>` for a bundled template
    #[arg(short, long)]
    pub template: Option<String>,

    /// Initial status
    #[arg(short, long)]
    pub status: Option<String>,

    /// Link to another record, as `<number>:<description>` (repeatable)
    #[arg(short, long = "link", value_name = "NUMBER:DESCRIPTION")]
    pub links: Vec<String>,

    /// Do not open the new record in an editor
    #[arg(long)]
    pub no_edit: bool,
}

/// Write the next record and open it for editing
pub fn new_record(ctx: &mut Context<'_>, args: NewArgs) -> Result<()> {
    let project = Project::open(ctx.fs, &ctx.cwd)?;
    let title = args.title.join(" ");

    let mut builder = project
        .record_builder(&title)?
        .date_style(project.config().date_style(ctx.host_locale.as_deref())?);
    if let Some(template) = &args.template {
        builder = builder.template(anchor_at(&ctx.cwd, template));
    }
    if let Some(status) = args.status {
        builder = builder.status(status);
    }

    let mut record = builder.build()?;
    for link in &args.links {
        record.add_link(link)?;
    }

    let path = record
        .store(ctx.fs, &project.templates())
        .with_context(|| format!("Unable to create record '{}'", title))?;
    writeln!(ctx.out, "{}", path.display())?;

    if args.no_edit {
        return Ok(());
    }
    match choose_editor(
        project.config().editor.as_deref(),
        ctx.env_editor.as_deref(),
        None,
    ) {
        Some(editor) => ctx.editor.open(&editor, &path)?,
        None => writeln!(
            ctx.err,
            "No editor configured (set VISUAL or EDITOR); edit {} by hand",
            path.display()
        )?,
    }
    Ok(())
}

/// Relative template paths given on the command line are relative to the
/// invocation directory
fn anchor_at(cwd: &Path, template: &str) -> String {
    if template.starts_with(RESOURCE_PREFIX) || Path::new(template).is_absolute() {
        template.to_string()
    } else {
        cwd.join(template).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Harness;
    use crate::commands::{init, InitArgs};
    use adr_core::record::{file_name, parse_links};
    use adr_core::FileSystem;
    use std::path::PathBuf;

    const DOCS: &str = "/project/adr/doc/adr";

    fn initialised() -> Harness {
        let mut harness = Harness::new();
        init(
            &mut harness.context(),
            InitArgs {
                directory: None,
                template: None,
            },
        )
        .unwrap();
        harness
    }

    fn args(title: &str) -> NewArgs {
        NewArgs {
            title: title.split(' ').map(str::to_string).collect(),
            template: None,
            status: None,
            links: Vec::new(),
            no_edit: false,
        }
    }

    #[test]
    fn simple_command_creates_second_record_and_opens_editor() {
        let mut harness = initialised();
        new_record(&mut harness.context(), args("This is a test achitecture decision")).unwrap();

        let expected =
            PathBuf::from(DOCS).join("0002-this-is-a-test-achitecture-decision.md");
        assert!(harness.fs.exists(&expected));
        assert_eq!(
            harness.editor.opened.borrow().as_slice(),
            &[("dummyEditor".to_string(), expected)]
        );
    }

    #[test]
    fn many_records_are_numbered_in_sequence() {
        let titles = [
            "another test architecture decision",
            "yet another test architecture decision",
            "and still the adrs come",
            "to be superseded",
            "some functional name",
            "something to link to",
            "a very important decision",
        ];
        let mut harness = initialised();
        for title in titles {
            new_record(&mut harness.context(), args(title)).unwrap();
        }

        let mut expected: Vec<_> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| PathBuf::from(DOCS).join(file_name(i as u32 + 2, title)))
            .collect();
        expected.push(PathBuf::from(DOCS).join("0001-record-architecture-decisions.md"));
        expected.sort();

        assert_eq!(harness.fs.list_dir(Path::new(DOCS)).unwrap(), expected);
    }

    #[test]
    fn status_and_links_are_written() {
        let mut harness = initialised();
        let mut new = args("Replace the first decision");
        new.status = Some("Accepted".into());
        new.links = vec!["1:Amends".into()];
        new.no_edit = true;
        new_record(&mut harness.context(), new).unwrap();

        let text = harness
            .fs
            .read_to_string(&PathBuf::from(DOCS).join("0002-replace-the-first-decision.md"))
            .unwrap();
        assert!(text.contains("\nAccepted\n"));
        assert!(text.contains("* Amends [1](0001-record-architecture-decisions.md)"));
        assert_eq!(parse_links(&text).len(), 1);
        assert!(harness.editor.opened.borrow().is_empty());
    }

    #[test]
    fn malformed_link_writes_nothing() {
        let mut harness = initialised();
        let mut new = args("Badly linked");
        new.links = vec!["bad-format".into()];

        assert!(new_record(&mut harness.context(), new).is_err());
        assert_eq!(harness.fs.list_dir(Path::new(DOCS)).unwrap().len(), 1);
    }

    #[test]
    fn relative_template_is_read_from_the_working_directory() {
        let mut harness = initialised();
        harness
            .fs
            .write(
                Path::new("/project/adr/short.md"),
                "# T\n\n## Status\n\nS\n\nShort template body\n",
            )
            .unwrap();
        let mut new = args("Short one");
        new.template = Some("short.md".into());
        new_record(&mut harness.context(), new).unwrap();

        let text = harness
            .fs
            .read_to_string(&PathBuf::from(DOCS).join("0002-short-one.md"))
            .unwrap();
        assert!(text.contains("Short template body"));
    }

    #[test]
    fn outside_a_project_fails() {
        let mut harness = Harness::new();
        let err = new_record(&mut harness.context(), args("Orphan")).unwrap_err();
        assert!(err.to_string().contains("no .adr directory"));
    }

    #[test]
    fn template_paths_are_anchored() {
        let cwd = Path::new("/work");
        assert_eq!(anchor_at(cwd, "t.md"), "/work/t.md");
        assert_eq!(anchor_at(cwd, "/abs/t.md"), "/abs/t.md");
        assert_eq!(anchor_at(cwd, "rsrc:x.md"), "rsrc:x.md");
    }
}
