//! import command - Replace a definition's frames and fields from JSON

use std::io::Read;
use std::path::Path;

use crate::cli::Context;
use crate::core::definition::DefinitionMeta;
use anyhow::{Context as _, Result};

/// Read a `DefinitionMeta` document and store it under `name`.
///
/// Reads from `file` when given, otherwise stdin.
pub fn import(ctx: &Context, name: &str, file: Option<&Path>) -> Result<()> {
    let json = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let meta = DefinitionMeta::from_json(&json).context("Invalid definition JSON")?;

    let mut def = ctx.definition(name)?;
    def.open_or_init()
        .with_context(|| format!("Failed to open definition '{name}'"))?;

    let dangling: Vec<String> = meta.dangling_frames().iter().map(|s| s.to_string()).collect();
    let (frames, fields) = (meta.frames.len(), meta.fields.len());

    def.apply_meta(meta);
    def.save()
        .with_context(|| format!("Failed to save definition '{name}'"))?;

    if !ctx.quiet {
        if !dangling.is_empty() {
            eprintln!(
                "warning: actions target undefined frames: {}",
                dangling.join(", ")
            );
        }
        println!(
            "Imported {} frame(s) and {} field(s) into {}/{}",
            frames,
            fields,
            def.index(),
            def.name()
        );
    }
    Ok(())
}
