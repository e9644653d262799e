//! check-name command - Validate a name against the naming rules

use crate::cli::Context;
use crate::core::naming::{suggest_name, validate_name};
use anyhow::{bail, Result};

/// Check `name` with the default naming policy.
pub fn check_name(ctx: &Context, name: &str) -> Result<()> {
    if let Err(e) = validate_name(name) {
        match suggest_name(name) {
            Some(suggestion) => bail!("{}. Try '{}'.", e, suggestion),
            None => bail!("{}", e),
        }
    }

    if !ctx.quiet {
        println!("'{}' is a valid name", name);
    }
    Ok(())
}
