//! framedef - input definition descriptor store
//!
//! An input definition describes how incoming records are translated into
//! index mutations: a set of frames (index structures with caching and
//! row-labeling options) and a set of fields, each with an ordered list of
//! actions targeting frames. framedef keeps one such definition per file
//! and provides a CLI to inspect and edit them.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, calls into core)
//! - [`core`] - Domain types, naming rules, codec, storage and config
//!
//! # Example
//!
//! ```no_run
//! use framedef::core::definition::{Definition, DefinitionMeta};
//!
//! let mut def = Definition::new("/var/lib/framedef/events", "events", "default")?;
//! def.open_or_init()?;
//! def.apply_meta(DefinitionMeta::from_json(r#"{"frames":[{"name":"f1"}]}"#)?);
//! def.save()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod core;
