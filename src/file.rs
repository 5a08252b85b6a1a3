// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::config::consts::{DEFAULT_FILE_STEM, FILE_PREFIX};
use crate::config::options::ExportFormat;
use crate::error::ExportError;

/// Where a finished export went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Saved {
    pub file_name: String,
    /// Human-readable destination (a path for files).
    pub location: String,
    pub path: Option<PathBuf>,
    pub bytes: usize,
}

/// The save step of an export. Only called with a fully rendered file.
pub trait FileSink {
    fn save(&mut self, file_name: &str, format: ExportFormat, bytes: &[u8]) -> Result<Saved, ExportError>;
}

/// Writes into a directory, or to a fixed file path when one was given.
#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
    file_name: Option<String>,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), file_name: None }
    }

    /// `-o` semantics: an existing dir or a trailing separator means "into
    /// this directory", anything else is the output file itself.
    pub fn for_target(target: &str, default_dir: &Path) -> Self {
        if target.trim().is_empty() {
            return Self::new(default_dir);
        }
        let p = PathBuf::from(normalize_separators(target));
        if looks_like_dir_hint(&p) || p.is_dir() {
            return Self::new(p);
        }
        let dir = p.parent().map(Path::to_path_buf).unwrap_or_default();
        let file_name = p.file_name().map(|s| s.to_string_lossy().into_owned());
        Self { dir, file_name }
    }

    pub fn dir(&self) -> &Path { &self.dir }
}

impl FileSink for DirSink {
    fn save(&mut self, file_name: &str, _format: ExportFormat, bytes: &[u8]) -> Result<Saved, ExportError> {
        if !self.dir.as_os_str().is_empty() {
            ensure_directory(&self.dir)?;
        }
        let name = self.file_name.clone().unwrap_or_else(|| s!(file_name));
        let path = self.dir.join(&name);
        fs::write(&path, bytes)?;
        logd!("File: wrote {} bytes to {}", bytes.len(), path.display());
        Ok(Saved {
            file_name: name,
            location: path.display().to_string(),
            path: Some(path),
            bytes: bytes.len(),
        })
    }
}

/// `data_sd_<area>.<ext>`, or `sd-kab-semarang.<ext>` without an area.
pub fn export_file_name(area: &str, format: ExportFormat) -> String {
    let stem = sanitize_stem(area);
    if stem.is_empty() {
        format!("{DEFAULT_FILE_STEM}.{}", format.ext())
    } else {
        format!("{FILE_PREFIX}{stem}.{}", format.ext())
    }
}

/// Whitespace runs become `_`; only alphanumerics, `-` and `_` survive.
pub fn sanitize_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() || ch == '_' { if !last_us { out.push('_'); last_us = true; } }
        else if ch == '-' { out.push(ch); last_us = false; }
    }
    out.trim_matches('_').to_string()
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
