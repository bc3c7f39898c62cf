//! Structured logging to a file under the data directory.
//!
//! The terminal belongs to the TUI, so nothing is written to stderr.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_NAME: &str = "arform.log";

#[derive(Debug)]
struct LoggingGuard {
    _guard: WorkerGuard,
    log_path: PathBuf,
}

static LOGGING_STATE: OnceLock<LoggingGuard> = OnceLock::new();

/// Errors that can arise while setting up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not determine data directory")]
    NoDataDir,
    #[error("failed to prepare log directory: {0}")]
    Io(#[from] io::Error),
    #[error("invalid logging filter: {0}")]
    Filter(#[from] ParseError),
    #[error("failed to install logging subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Installs the global subscriber and returns the log file path.
///
/// The first call wins; later calls return the same path.
pub fn init_logging() -> Result<&'static PathBuf, LoggingError> {
    if LOGGING_STATE.get().is_none() {
        let dir = dirs::data_dir()
            .ok_or(LoggingError::NoDataDir)?
            .join("arform")
            .join("logs");
        let guard = install_logging(dir)?;
        // A concurrent initializer may have won; its guard is kept instead.
        let _ = LOGGING_STATE.set(guard);
    }
    match LOGGING_STATE.get() {
        Some(state) => Ok(&state.log_path),
        None => Err(LoggingError::NoDataDir),
    }
}

fn install_logging(dir: PathBuf) -> Result<LoggingGuard, LoggingError> {
    fs::create_dir_all(&dir)?;
    let log_path = dir.join(LOG_FILE_NAME);
    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(
            tracing_subscriber::fmt::format()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_level(true)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(build_filter()?)
        .with(file_layer)
        .try_init()?;

    info!(path = %log_path.display(), "structured logging enabled");

    Ok(LoggingGuard {
        _guard: guard,
        log_path,
    })
}

fn build_filter() -> Result<EnvFilter, ParseError> {
    let arform_log = env::var("ARFORM_LOG").ok();
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    EnvFilter::try_new(filter_directives(
        arform_log.as_deref(),
        rust_log.as_deref(),
    ))
}

/// `ARFORM_LOG` wins over `RUST_LOG`; the default level is `info`. Blank
/// values are ignored.
fn filter_directives<'a>(arform_log: Option<&'a str>, rust_log: Option<&'a str>) -> &'a str {
    [arform_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|spec| !spec.is_empty())
        .unwrap_or("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arform_log_wins() {
        assert_eq!(filter_directives(Some("debug"), Some("warn")), "debug");
    }

    #[test]
    fn falls_back_to_rust_log() {
        assert_eq!(filter_directives(None, Some("arform=trace")), "arform=trace");
        assert_eq!(filter_directives(Some("  "), Some("warn")), "warn");
    }

    #[test]
    fn defaults_to_info() {
        assert_eq!(filter_directives(None, None), "info");
        assert_eq!(filter_directives(Some(""), Some(" ")), "info");
    }

    #[test]
    fn chosen_directives_parse() {
        assert!(EnvFilter::try_new(filter_directives(None, None)).is_ok());
        assert!(EnvFilter::try_new(filter_directives(Some("arform=debug,reqwest=warn"), None)).is_ok());
    }
}
