//! Log file setup
//!
//! The terminal is in raw mode while the dashboard runs, so tracing output
//! goes to a file instead of stderr.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

/// Installs the global tracing subscriber writing to `path`
///
/// With no path, events are discarded.
pub fn init(level: Level, path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    tracing::debug!("Logging to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_without_path_is_noop() {
        assert!(init(Level::INFO, None).is_ok());
    }

    #[test]
    fn test_init_writes_events_to_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("logs").join("ziamet.log");

        init(Level::INFO, Some(&path)).expect("subscriber should install");
        tracing::warn!("fallback engaged");

        let contents = fs::read_to_string(&path).expect("log file exists");
        assert!(contents.contains("fallback engaged"));
        assert!(contents.contains("WARN"));

        // A second global subscriber is rejected
        let again = init(Level::INFO, Some(&path));
        assert!(again.is_err());
    }
}
