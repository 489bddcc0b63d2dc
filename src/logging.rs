//! Logging setup for the command line and the interactive picker

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the console subscriber
///
/// `RUST_LOG` takes precedence; otherwise the level is `debug` when
/// `verbose` is set and `info` elsewhere. Calling it twice is harmless.
pub fn setup(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("picker=debug,picker_lib=debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let console_layer = fmt::layer().with_target(false);

    if tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!("Logging initialized (verbose={})", verbose);
    }
}
