#![forbid(unsafe_code)]

//! Logging bootstrap using `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the UI, so nothing is written to stdout or
//! stderr. Logging is enabled only when a log file is configured.
//!
//! Targets in use:
//!
//! - `gita.session`: login, guest entry, logout and declined submissions
//! - `gita.nav`: screen transitions
//! - `gita.assistant`: chat sends and scripted replies
//! - `gita.shell`: startup and view-local actions

use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

/// Environment variable holding filter directives.
pub const FILTER_ENV: &str = "GITA_SHELL_LOG";
/// Filter used when [`FILTER_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Failure to install the subscriber.
#[derive(Debug)]
pub enum LogInitError {
    /// The log file could not be opened.
    Open { path: PathBuf, source: io::Error },
    /// Another global subscriber is already installed.
    AlreadyInstalled,
}

impl fmt::Display for LogInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
            Self::AlreadyInstalled => f.write_str("a tracing subscriber is already installed"),
        }
    }
}

impl std::error::Error for LogInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::AlreadyInstalled => None,
        }
    }
}

/// Build the filter from `directives`, falling back to [`DEFAULT_FILTER`].
pub fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber if `log_file` is set.
///
/// Returns `Ok(false)` when logging stays disabled.
pub fn init(log_file: Option<&Path>) -> Result<bool, LogInitError> {
    let Some(path) = log_file else {
        return Ok(false);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogInitError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let directives = std::env::var(FILTER_ENV).ok();
    init_with_writer(directives.as_deref(), Mutex::new(file))?;
    Ok(true)
}

/// Install the global subscriber writing to `writer`.
pub fn init_with_writer<W>(directives: Option<&str>, writer: W) -> Result<(), LogInitError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = tfmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    tracing_subscriber::registry()
        .with(build_filter(directives))
        .with(layer)
        .try_init()
        .map_err(|_| LogInitError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_log_file_means_no_subscriber() {
        assert!(matches!(init(None), Ok(false)));
    }

    #[test]
    fn filter_falls_back_to_default() {
        assert_eq!(build_filter(None).to_string(), DEFAULT_FILTER);
        assert_eq!(build_filter(Some("  ")).to_string(), DEFAULT_FILTER);
        assert_eq!(
            build_filter(Some("gita.nav=debug")).to_string(),
            "gita.nav=debug"
        );
    }

    #[test]
    fn unopenable_file_is_reported() {
        let err = init(Some(Path::new("/nonexistent-dir/gita.log"))).unwrap_err();
        assert!(err.to_string().contains("cannot open log file"), "{err}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
