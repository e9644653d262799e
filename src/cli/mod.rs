//! cli
//!
//! Command-line interface layer for framedef.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve configuration (defaults < config file < flags)
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers build a [`Context`], obtain a
//! [`Definition`] from it and call into [`crate::core`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{anyhow, Context as _, Result};

use crate::core::config::Config;
use crate::core::definition::Definition;

/// Resolved settings shared by all command handlers.
#[derive(Debug)]
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    /// Explicit config file path (`--config`)
    pub config_path: Option<PathBuf>,
    /// `--data-dir` override
    pub data_dir: Option<PathBuf>,
    /// `--index` override
    pub index: Option<String>,
    /// Debug output enabled
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
}

impl Context {
    /// Index to operate on: `--index`, else the configured default.
    pub fn index(&self) -> Result<String> {
        self.index
            .clone()
            .or_else(|| self.config.default_index().map(str::to_string))
            .ok_or_else(|| {
                anyhow!("No index given. Pass --index or set default_index in the config file.")
            })
    }

    /// Root data directory: `--data-dir`, else config.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => self
                .config
                .data_dir()
                .context("Failed to resolve data directory"),
        }
    }

    /// Build an unopened definition for `name` in the current index.
    pub fn definition(&self, name: &str) -> Result<Definition> {
        let index = self.index()?;
        crate::core::naming::validate_name(&index)
            .with_context(|| format!("Invalid index name '{index}'"))?;

        let dir = self.data_dir()?.join(&index);
        Definition::new(dir, index, name).with_context(|| format!("Invalid definition name '{name}'"))
    }

    /// Config file to write: `--config`, the loaded file, or the canonical path.
    pub fn writable_config_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config_path {
            return Ok(path.clone());
        }
        if let Some(path) = self.config.loaded_from() {
            return Ok(path.to_path_buf());
        }
        Config::config_path().context("Failed to determine config path")
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) if path.exists() => Config::load_from(path),
        // `config set` may create it
        Some(_) => Ok(Config::default()),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    let ctx = Context {
        config,
        config_path: cli.config.clone(),
        data_dir: cli.data_dir.clone(),
        index: cli.index.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}
