//! Process-wide tracing and error-report setup for host binaries.
//!
//! The subscriber is installed with `try_init`, so a host that calls this more
//! than once (or already has a global subscriber) gets an error back instead of
//! a panic.

use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install `color_eyre` and the tracing subscriber.
pub fn install() -> Result<()> {
    color_eyre::install()?;
    init_tracing()
}

/// Compact console logging filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
