//! Simple file-based logging
//!
//! Nothing is written until [`init`] opens a log file, so library users that
//! never configure logging pay only for a lock check.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

static LOG_FILE: Mutex<Option<File>> = parking_lot::const_mutex(None);

/// Default log file name used when configuration does not name one
pub const DEFAULT_LOG_FILE: &str = "dashkit.log";

/// Directory used for relative log paths
pub fn log_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Open (and truncate) the log file at `path`
pub fn init(path: &Path) -> std::io::Result<()> {
    let path = if path.is_relative() {
        log_dir().join(path)
    } else {
        path.to_path_buf()
    };

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    *LOG_FILE.lock() = Some(file);

    log("=== Dashkit Log Started ===");
    Ok(())
}

/// Stop logging and close the file
pub fn shutdown() {
    *LOG_FILE.lock() = None;
}

/// Whether a log file is currently open
pub fn is_enabled() -> bool {
    LOG_FILE.lock().is_some()
}

/// Get current timestamp as a string
fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Log a message to the file
pub fn log(msg: &str) {
    let mut guard = LOG_FILE.lock();
    if let Some(ref mut file) = *guard {
        let _ = writeln!(file, "[{}] {}", timestamp(), msg);
        let _ = file.flush();
    }
}

/// Log a formatted message
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log::log(&format!($($arg)*))
    };
}

/// Log with function context
#[macro_export]
macro_rules! log_fn {
    ($fn_name:expr) => {
        $crate::log::log(&format!("-> {}", $fn_name))
    };
    ($fn_name:expr, $($arg:tt)*) => {
        $crate::log::log(&format!("-> {}: {}", $fn_name, format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kit.log");

        init(&path).unwrap();
        assert!(is_enabled());
        crate::log!("widget {} mounted", "cpu");
        crate::log_fn!("render", "{} nodes", 3);
        shutdown();
        assert!(!is_enabled());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("=== Dashkit Log Started ==="));
        assert!(content.contains("] widget cpu mounted"));
        assert!(content.contains("-> render: 3 nodes"));
    }
}
