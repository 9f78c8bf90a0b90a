//! Tracing subscriber setup for the command-line front end.

use tracing_subscriber::{EnvFilter, fmt};

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug over warn.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "homechores=debug" } else { "homechores=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("tracing init failed: {}", e);
    }
}
