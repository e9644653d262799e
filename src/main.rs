//! framedef binary entry point.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use framedef::cli::{self, Cli};

fn main() -> ExitCode {
    let args = Cli::parse_args();

    // RUST_LOG wins; otherwise --debug selects debug, else warnings only.
    let default_level = if args.debug { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
