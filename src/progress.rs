// src/progress.rs
use std::path::Path;

/// Progress reporting for operations. The CLI implements this to print
/// status lines; library callers can pass [`NullProgress`].
pub trait Progress {
    /// Called at the start with the number of operations about to run.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when an operation writes an artifact.
    fn item_done(&mut self, _op: &str, _path: &Path) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every line; handy in tests.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub lines: Vec<String>,
    pub written: Vec<(String, std::path::PathBuf)>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }

    fn item_done(&mut self, op: &str, path: &Path) {
        self.written.push((s!(op), path.to_path_buf()));
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}
