// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod error;
pub mod log;

pub mod data;
pub mod fields;
pub mod filter;
pub mod process;
pub mod source;
pub mod stats;
pub mod store;

pub mod csv;
pub mod export;
pub mod file;
pub mod xlsx;

pub mod notice;
pub mod progress;
pub mod session;

#[cfg(feature = "cli")]
pub mod cli;
pub mod gui;

pub use error::{Error, Result};
