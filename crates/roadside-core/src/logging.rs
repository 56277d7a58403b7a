//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "ROADSIDE_LOG";

/// Filter used when `ROADSIDE_LOG` is unset: info for every workspace crate,
/// warn for dependencies
pub const DEFAULT_FILTER: &str = "roadside=info,roadside_core=info,roadside_app=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/roadside/logs/` because stdout
/// carries the headless NDJSON stream.
/// Log level is controlled by the `ROADSIDE_LOG` environment variable.
///
/// # Examples
/// ```bash
/// ROADSIDE_LOG=debug cargo run
/// ROADSIDE_LOG=roadside_app=trace cargo run
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "roadside.log");

    // Default to info, allow override via ROADSIDE_LOG
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Roadside head unit starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("roadside").join("logs"))
}
