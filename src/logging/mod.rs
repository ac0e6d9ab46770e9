// Logging module for structured logging using the tracing crate

use std::error::Error;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the tracing subscriber for structured logging.
///
/// Filtering follows `RUST_LOG` when set and defaults to `info`. Setting
/// `UKIYO_LOG_JSON=1` switches to JSON output for log aggregation systems;
/// the default is the human-readable format.
///
/// # Errors
///
/// Returns an error if a global subscriber was already installed.
pub fn init_subscriber() -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("UKIYO_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if json {
        fmt().json().with_env_filter(filter).try_init()?;
    } else {
        fmt().with_env_filter(filter).try_init()?;
    }

    Ok(())
}
