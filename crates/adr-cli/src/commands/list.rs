use adr_core::Project;
use anyhow::Result;

use super::Context;

/// Print the path of every record, oldest first
pub fn list(ctx: &mut Context<'_>) -> Result<()> {
    let project = Project::open(ctx.fs, &ctx.cwd)?;
    for record in project.records()? {
        let shown = record.path.strip_prefix(&ctx.cwd).unwrap_or(&record.path);
        writeln!(ctx.out, "{}", shown.display())?;
    }
    Ok(())
}
