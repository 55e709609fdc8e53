//! Tracing subscriber setup for binaries and tests embedding the engine.

use std::sync::Once;

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const DEFAULT_FILTER: &str = "info";

static TRACING_INSTALLED: Once = Once::new();

/// Install a console subscriber filtered by `RUST_LOG` (idempotent).
///
/// Falls back to `info` when `RUST_LOG` is unset or invalid. If another
/// global subscriber is already installed this does nothing.
pub fn install_tracing() {
    TRACING_INSTALLED.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let console = fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(filter);

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("colorgate tracing subscriber failed to initialize");
        }
    });
}
