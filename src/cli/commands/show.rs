//! show command - Display a definition's frames and fields

use std::collections::BTreeMap;

use super::open_existing;
use crate::cli::Context;
use crate::core::definition::codec;
use crate::core::definition::{Action, Frame, ValueSource};
use anyhow::{Context as _, Result};

/// Display a definition.
pub fn show(ctx: &Context, name: &str) -> Result<()> {
    let def = open_existing(ctx, name)?;

    // The stored name may differ from `name`; read back the file actually loaded.
    let file = def
        .loaded_from()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| def.file_path());
    let bytes =
        std::fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
    let checksum = codec::stored_checksum(&bytes).context("Failed to read descriptor header")?;

    println!("Definition: {}", def.name());
    println!("Index:      {}", def.index());
    println!("File:       {}", file.display());
    if ctx.debug {
        println!("Checksum:   {}", checksum);
    } else {
        println!("Checksum:   {}", &checksum[..12]);
    }

    println!();
    println!("Frames ({}):", def.frames().len());
    for frame in def.frames() {
        println!("  {}", format_frame(frame));
    }

    println!();
    println!("Fields ({}):", def.fields().len());
    for field in def.fields() {
        let marker = if field.primary_key { " [primary key]" } else { "" };
        println!("  {}{}", field.name, marker);
        for action in &field.actions {
            println!("    -> {}", format_action(action));
        }
    }

    let meta = def.meta();
    let dangling = meta.dangling_frames();
    if !dangling.is_empty() {
        println!();
        println!("Undefined frames referenced: {}", dangling.join(", "));
    }

    Ok(())
}

fn format_frame(frame: &Frame) -> String {
    let o = &frame.options;
    let mut line = format!(
        "{} rowLabel={} cacheType={} cacheSize={}",
        frame.name, o.row_label, o.cache_type, o.cache_size
    );
    if o.inverse_enabled {
        line.push_str(" inverse");
    }
    if !o.time_quantum.is_empty() {
        line.push_str(&format!(" timeQuantum={}", o.time_quantum));
    }
    line
}

fn format_action(action: &Action) -> String {
    match action.source() {
        Some(ValueSource::FixedRow(row)) => format!("{} rowID={}", action.frame, row),
        Some(ValueSource::MappedValue(table)) => {
            let mut line = format!("{} valueMap{{{}}}", action.frame, format_table(table));
            if action.row_id != 0 {
                line.push_str(&format!(" rowID={}", action.row_id));
            }
            line
        }
        None => format!(
            "{} {} rowID={} valueMap{{{}}}",
            action.frame,
            action.value_destination,
            action.row_id,
            format_table(&action.value_map)
        ),
    }
}

fn format_table(table: &BTreeMap<String, u64>) -> String {
    let entries: Vec<String> = table.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    entries.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::definition::FrameOptions;
    use crate::core::types::TimeQuantum;

    #[test]
    fn frame_line() {
        let frame = Frame::new(
            "f1",
            FrameOptions::default()
                .row_label("id")
                .cache_size(1000)
                .inverse_enabled(true)
                .time_quantum(TimeQuantum::new("YM").unwrap()),
        );
        assert_eq!(
            format_frame(&frame),
            "f1 rowLabel=id cacheType=ranked cacheSize=1000 inverse timeQuantum=YM"
        );
    }

    #[test]
    fn action_lines() {
        assert_eq!(format_action(&Action::fixed_row("f1", 5)), "f1 rowID=5");
        assert_eq!(
            format_action(&Action::mapped("f1", [("young", 1), ("old", 2)])),
            "f1 valueMap{old=2, young=1}"
        );
        assert_eq!(
            format_action(&Action::mapped("f1", [("a", 1)]).with_row_id(4)),
            "f1 valueMap{a=1} rowID=4"
        );

        let custom = Action {
            frame: "f2".into(),
            value_destination: "mapping".into(),
            row_id: 3,
            ..Default::default()
        };
        assert_eq!(format_action(&custom), "f2 mapping rowID=3 valueMap{}");
    }
}
