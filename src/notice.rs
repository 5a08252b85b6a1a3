// src/notice.rs
//! What the user gets told after an action. Rendering is up to the frontend.

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn title(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "Done",
            NoticeLevel::Info => "Info",
            NoticeLevel::Warning => "Heads up",
            NoticeLevel::Error => "Error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
    pub fn success(message: impl Into<String>) -> Self { Self::new(NoticeLevel::Success, message) }
    pub fn info(message: impl Into<String>) -> Self { Self::new(NoticeLevel::Info, message) }
    pub fn warning(message: impl Into<String>) -> Self { Self::new(NoticeLevel::Warning, message) }
    pub fn error(message: impl Into<String>) -> Self { Self::new(NoticeLevel::Error, message) }

    /// Input problems warn, everything else is an error. Logged either way.
    pub fn from_error(err: &Error) -> Self {
        if err.is_user_input() {
            logw!("{err}");
            Self::warning(err.user_message())
        } else {
            loge!("{err}");
            Self::error(err.user_message())
        }
    }
}

/// Collapse an action result into a notice.
pub fn notice_for<T>(res: &Result<T, Error>, ok: impl FnOnce(&T) -> String) -> Notice {
    match res {
        Ok(v) => Notice::success(ok(v)),
        Err(e) => Notice::from_error(e),
    }
}
