//! core
//!
//! Domain types, schemas and persistence for framedef.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CacheType, TimeQuantum
//! - [`naming`] - Naming rules and the pluggable name policy
//! - [`definition`] - Input definitions, their model, codec and storage
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Stored descriptors are verified before they are trusted
//! - Loads and saves are whole-file operations

pub mod config;
pub mod definition;
pub mod naming;
pub mod types;
