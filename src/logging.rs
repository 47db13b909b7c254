//! Diagnostic logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "vercheck=debug"
    } else {
        "vercheck=warn"
    }
}

/// Installs the global subscriber, writing to stderr so stdout stays clean.
///
/// `RUST_LOG` takes precedence over `verbose`. Calling this twice is a no-op.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
