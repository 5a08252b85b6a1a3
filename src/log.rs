// src/log.rs
//
// Subscriber setup for the `logf!` / `logd!` / `logw!` / `loge!` macros.
// CLI logs to stderr; the GUI appends to `.store/debug.log` so the
// window stays the only thing the user sees.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::consts::LOG_FILE;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: Level,
    pub target: LogTarget,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: Level::WARN, target: LogTarget::Stderr, with_ansi: true }
    }
}

impl LogConfig {
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self { level, ..Self::default() }
    }

    pub fn gui_default() -> Self {
        Self {
            level: Level::DEBUG,
            target: LogTarget::File(PathBuf::from(LOG_FILE)),
            with_ansi: false,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Fails if a subscriber is already set or the log file can't be opened.
pub fn init(cfg: &LogConfig) -> io::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(cfg.level).into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);

    let res = match &cfg.target {
        LogTarget::Stderr => registry
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(cfg.with_ansi)
                    .with_target(false),
            )
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
                .try_init()
        }
    };

    res.map_err(io::Error::other)
}
