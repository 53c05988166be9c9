use anyhow::Result;

use super::Context;

pub fn version(ctx: &mut Context<'_>) -> Result<()> {
    writeln!(ctx.out, "adr {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Harness;

    #[test]
    fn prints_the_package_version_to_the_command_output() {
        let mut harness = Harness::new();
        version(&mut harness.context()).unwrap();

        assert_eq!(harness.stdout(), format!("adr {}\n", env!("CARGO_PKG_VERSION")));
        assert!(harness.stderr().is_empty());
    }

    #[test]
    fn needs_no_project() {
        let mut harness = Harness::new();
        harness.cwd = "/elsewhere".into();
        assert!(version(&mut harness.context()).is_ok());
    }
}
