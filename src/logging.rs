// src/logging.rs
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

/// Appends `[elapsed][LEVEL] msg` lines to a file; warnings and errors also
/// go to stderr so the operator sees them without opening the log.
pub struct FileLogger {
    start: Instant,
    level: LevelFilter,
    file: Mutex<Option<File>>,
}

impl FileLogger {
    fn new(path: &Path, level: LevelFilter) -> Self {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = fs::create_dir_all(parent);
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path).ok();
        Self { start: Instant::now(), level, file: Mutex::new(file) }
    }
}

/// `hh:mm:ss.mmm` stamp for a log line.
pub fn stamp(since_start: Duration) -> String {
    let secs = since_start.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60,
        since_start.subsec_millis()
    )
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = stamp(self.start.elapsed());
        let line = format!("[{elapsed}][{}] {}\n", record.level(), record.args());

        if record.level() <= Level::Warn {
            eprint!("{line}");
        }
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// Install the file logger. Call once, from the binary.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| FileLogger::new(path, level));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::log::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::log::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::log::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::log::error!($($arg)*)
    };
}
