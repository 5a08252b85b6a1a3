// src/progress.rs
/// Progress reporting for long-running actions (scrape/export).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with a short description of the request.
    fn begin(&mut self, _what: &str) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called once rows are in the cache.
    fn finish(&mut self, _rows: usize) {}

    /// Called instead of `finish` when the action failed.
    fn failed(&mut self, _msg: &str) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
