//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the definition it works on through the [`Context`]
//! 2. Calls into [`crate::core`]
//! 3. Formats and displays output

mod check_name;
mod completion;
mod config_cmd;
mod export;
mod import;
mod init;
mod show;

// Re-export command functions for testing and direct invocation
pub use check_name::check_name;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, path as config_path, set as config_set};
pub use export::export;
pub use import::import;
pub use init::init;
pub use show::show;

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use crate::core::definition::{Definition, DefinitionError};
use anyhow::{bail, Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Init { name } => init::init(ctx, &name),
        Command::Show { name } => show::show(ctx, &name),
        Command::Export { name } => export::export(ctx, &name),
        Command::Import { name, file } => import::import(ctx, &name, file.as_deref()),
        Command::CheckName { name } => check_name::check_name(ctx, &name),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
            ConfigAction::Path => config_cmd::path(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Open an existing definition, turning a missing file into a hint.
fn open_existing(ctx: &Context, name: &str) -> Result<Definition> {
    let mut def = ctx.definition(name)?;
    match def.open() {
        Ok(()) => Ok(def),
        Err(DefinitionError::NotFound { path }) => bail!(
            "Definition '{}' not found at {}. Run 'framedef init {}' first.",
            name,
            path.display(),
            name
        ),
        Err(e) => Err(e).with_context(|| format!("Failed to open definition '{name}'")),
    }
}
