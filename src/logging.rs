//! Diagnostic logging
//!
//! Library code emits `tracing` events; the CLI installs a stderr
//! subscriber once at startup. `RUST_LOG` wins over the `--verbose` flag.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "reorder=debug"
    } else {
        "reorder=warn"
    }
}

/// Installs the global subscriber; later calls are ignored
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
