use std::env;
use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "UNCONF_LOG";

/// Install the global stderr subscriber.
///
/// Filter precedence: `UNCONF_LOG`, then `RUST_LOG`, then `debug` when
/// `verbose` is set, else `warn`. Stdout stays reserved for command output.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = build_filter(verbose)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install logging subscriber")
}

fn build_filter(verbose: bool) -> Result<EnvFilter> {
    if let Ok(spec) = env::var(LOG_ENV) {
        if !spec.trim().is_empty() {
            return EnvFilter::try_new(&spec)
                .with_context(|| format!("Invalid {} filter: {}", LOG_ENV, spec));
        }
    }

    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => {
            let default = if verbose { "debug" } else { "warn" };
            EnvFilter::try_new(default).context("Invalid default log filter")
        }
    }
}
