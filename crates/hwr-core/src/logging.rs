use tracing_subscriber::{fmt, EnvFilter};

use crate::{errors::Error, Result};

/// Initialize logging/tracing for the notifier.
///
/// Records are single lines: timestamp, level, message.
pub fn init(service_name: &str) -> Result<()> {
    // Default: info for dependencies, debug for our crates.
    // Can be overridden with `RUST_LOG`.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "info,hwr_core=debug,hwr_practicum=debug,hwr_telegram=debug,{}=debug",
            service_name.replace('-', "_")
        ))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .try_init()
        .map_err(|e| Error::Config(format!("не удалось настроить логирование: {e}")))
}
