//! File logging
//!
//! The terminal belongs to the editor, so diagnostics go to a log file:
//! `~/.pyedit.log` unless `--log-file` names another. Filter with the
//! `PYEDIT_LOG` environment variable, e.g. `PYEDIT_LOG=pyedit::syntax=trace`.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{EditorError, Result};

/// Environment variable holding the log filter
const FILTER_ENV: &str = "PYEDIT_LOG";

/// Default log file location
pub fn default_log_path() -> Option<PathBuf> {
    let home = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var(home)
        .ok()
        .map(|dir| PathBuf::from(dir).join(".pyedit.log"))
}

/// Split a log path into directory and file name
fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| EditorError::Message(format!("bad log file: {}", path.display())))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((dir, file_name))
}

/// Install the global subscriber
///
/// Does nothing when no log path can be determined.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file.map(Path::to_path_buf).or_else(default_log_path) else {
        return Ok(());
    };
    let (dir, file_name) = split_log_path(&path)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| EditorError::Message(format!("cannot open log file: {}", e)))?;

    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|e| EditorError::Message(format!("cannot install logger: {}", e)))?;

    tracing::info!(path = %path.display(), version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/var/log/pyedit.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(name, "pyedit.log");

        let (dir, name) = split_log_path(Path::new("edit.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "edit.log");

        assert!(split_log_path(Path::new("/")).is_err());
    }
}
