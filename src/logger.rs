pub use tracing::{debug, error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset. Per-frame blanking values are
/// logged at `debug`, so they stay hidden unless asked for.
pub const DEFAULT_DIRECTIVE: &str = "info";

pub fn init() {
    if let Err(e) = try_init(DEFAULT_DIRECTIVE) {
        eprintln!("logger already initialized: {e}");
    }
}

/// Installs the global subscriber, falling back to `default_directive`
/// when `RUST_LOG` is missing or unparsable.
pub fn try_init(default_directive: &str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}
