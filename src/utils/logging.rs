//! Log output for the binary. Library code only emits `tracing` events.

use tracing::Level;

/// Max level for the `--verbose` flag.
pub fn log_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::WARN }
}

/// Install the stderr subscriber. Only the first call takes effect.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
