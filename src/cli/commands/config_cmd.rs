//! config command - Get, set, or list configuration values

use crate::cli::Context;
use crate::core::config::Config;
use anyhow::{bail, Context as _, Result};

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let value = match key {
        "data_dir" => ctx.data_dir()?.display().to_string(),
        "default_index" => ctx.config.default_index().unwrap_or_default().to_string(),
        _ => bail!("Unknown configuration key: {}", key),
    };

    if !value.is_empty() {
        println!("{}", value);
    }
    Ok(())
}

/// Set a configuration value and write the config file.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let path = ctx.writable_config_path()?;

    let mut file = ctx.config.file.clone();
    file.set(key, value).context("Invalid configuration")?;
    Config::write(&path, &file).context("Failed to write config")?;

    if !ctx.quiet {
        println!("Set {} = {}", key, value);
    }
    Ok(())
}

/// List all configuration values with defaults applied.
pub fn list(ctx: &Context) -> Result<()> {
    println!("data_dir = {}", ctx.data_dir()?.display());
    match ctx.config.default_index() {
        Some(index) => println!("default_index = {}", index),
        None => println!("default_index = (unset)"),
    }
    Ok(())
}

/// Print the config file in effect.
pub fn path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.writable_config_path()?.display());
    Ok(())
}
