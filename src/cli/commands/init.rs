//! init command - Create an empty definition

use crate::cli::Context;
use anyhow::{Context as _, Result};

/// Create an empty definition unless one already exists.
pub fn init(ctx: &Context, name: &str) -> Result<()> {
    let mut def = ctx.definition(name)?;
    // Checked before opening: a stored name can differ from `name`.
    let existed = def.file_path().exists();
    def.open_or_init()
        .with_context(|| format!("Failed to open definition '{name}'"))?;

    if existed {
        if !ctx.quiet {
            println!(
                "Definition '{}' already exists in index '{}'",
                def.name(),
                def.index()
            );
        }
        return Ok(());
    }

    def.save()
        .with_context(|| format!("Failed to save definition '{name}'"))?;

    if !ctx.quiet {
        println!("Created {}", def.file_path().display());
    }
    Ok(())
}
