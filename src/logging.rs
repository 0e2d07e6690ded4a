//! File logging with tracing.
//!
//! The TUI owns the terminal, so logs always go to a file rather than stderr.
//! Filtering comes from `REFLEX_SHOWCASE_LOG` when set, otherwise from the
//! `--log-level` flag applied to this crate only.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::LoggingError;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "reflex-showcase.log";

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "REFLEX_SHOWCASE_LOG";

/// Filter for `level`, unless the environment provides a full directive.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(format!("reflex_showcase={level}")))
        .unwrap_or_else(|_| EnvFilter::new("reflex_showcase=info"))
}

/// Install the global subscriber, appending to `log_path`.
///
/// Hold the returned guard until exit; dropping it flushes pending lines.
pub fn init_logging(log_path: Option<&Path>, level: &str) -> Result<WorkerGuard, LoggingError> {
    let log_path = log_path.unwrap_or(Path::new(DEFAULT_LOG_FILE));
    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_LOG_FILE);

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    #[cfg(debug_assertions)]
    let file_layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        file_layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
    };

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_scopes_level_to_crate() {
        // The environment directive takes precedence when present
        if std::env::var_os(LOG_ENV).is_none() {
            assert_eq!(build_filter("debug").to_string(), "reflex_showcase=debug");
        }
    }

    #[test]
    fn test_bad_level_falls_back_to_info() {
        if std::env::var_os(LOG_ENV).is_none() {
            assert_eq!(build_filter("[[").to_string(), "reflex_showcase=info");
        }
    }
}
