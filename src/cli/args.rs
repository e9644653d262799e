//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--data-dir <path>`: Override the data directory
//! - `--index <name>`: Index owning the definition
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// framedef - store and inspect input definition descriptors
#[derive(Parser, Debug)]
#[command(name = "framedef")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default search path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Root directory for definitions (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Index owning the definition (overrides config default_index)
    #[arg(long, short = 'i', global = true)]
    pub index: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty definition if it does not exist
    #[command(
        name = "init",
        after_help = "\
EXAMPLES:
    framedef --index events init default"
    )]
    Init {
        /// Definition name
        name: String,
    },

    /// Show a definition's frames and fields
    #[command(
        name = "show",
        long_about = "Show a definition's frames and fields.\n\n\
            Prints the stored name, owning index, file location and payload \
            checksum, followed by each frame's options and each field's actions \
            in stored order."
    )]
    Show {
        /// Definition name
        name: String,
    },

    /// Print a definition as JSON
    #[command(name = "export")]
    Export {
        /// Definition name
        name: String,
    },

    /// Replace a definition's frames and fields from JSON
    #[command(
        name = "import",
        long_about = "Replace a definition's frames and fields from JSON.\n\n\
            Reads a document of the form {\"frames\": [...], \"fields\": [...]} \
            and overwrites the stored descriptor with it. The definition is \
            created if it does not exist.",
        after_help = "\
EXAMPLES:
    # From a file
    framedef --index events import default --file schema.json

    # From stdin
    framedef export default | framedef --index other import default"
    )]
    Import {
        /// Definition name
        name: String,

        /// Read JSON from this file instead of stdin
        #[arg(long, short = 'f', value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Check a name against the naming rules
    #[command(name = "check-name")]
    CheckName {
        /// Name to check
        name: String,
    },

    /// Get, set, or list configuration values
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    framedef completion bash >> ~/.bashrc

    # Fish
    framedef completion fish > ~/.config/fish/completions/framedef.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
    /// Print the config file location
    Path,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
