//! export command - Print a definition as JSON

use super::open_existing;
use crate::cli::Context;
use anyhow::{Context as _, Result};

/// Print the frames and fields of a definition as JSON.
pub fn export(ctx: &Context, name: &str) -> Result<()> {
    let def = open_existing(ctx, name)?;
    let json = def
        .meta()
        .to_json_pretty()
        .context("Failed to serialize definition")?;
    println!("{}", json);
    Ok(())
}
