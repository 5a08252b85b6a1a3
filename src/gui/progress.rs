// src/gui/progress.rs
use std::sync::{ Arc, Mutex };
use crate::progress::Progress;

/// Mirrors progress into the status line under the buttons.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    what: String,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, what: s!() }
    }
    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, what: &str) {
        self.what = s!(what);
        self.set_status(format!("Scraping {what} ..."));
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn finish(&mut self, rows: usize) {
        self.set_status(format!("Loaded {rows} rows for {}", self.what));
    }
    fn failed(&mut self, msg: &str) {
        self.set_status(format!("Failed: {msg}"));
    }
}
