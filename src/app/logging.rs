//! Structured logging setup.
//!
//! Level precedence: `RUST_LOG`, then the `--log-level` flag, then
//! `WOOPY_LOG_LEVEL`, then `info`. Output goes to stderr so command output on
//! stdout stays clean.

use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::AppError;

pub const LOG_LEVEL_ENV: &str = "WOOPY_LOG_LEVEL";

static INIT: Once = Once::new();

/// Resolve the effective default level from the flag and environment.
pub fn resolve_level(flag: Option<&str>, env_value: Option<&str>) -> Result<LevelFilter, AppError> {
    let raw = flag.or(env_value).unwrap_or("info");
    raw.trim().parse::<LevelFilter>().map_err(|_| {
        AppError::config_error(format!(
            "Invalid log level '{}': expected off, error, warn, info, debug or trace",
            raw
        ))
    })
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(flag: Option<&str>) -> Result<(), AppError> {
    let env_value = std::env::var(LOG_LEVEL_ENV).ok();
    let level = resolve_level(flag, env_value.as_deref())?;

    INIT.call_once(|| {
        let filter =
            EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

        // A subscriber installed by a test harness wins; ignore the error.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init();
    });

    Ok(())
}
