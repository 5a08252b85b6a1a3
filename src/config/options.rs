// src/config/options.rs
use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub export: ExportOptions,
    pub filter: FilterDefaults,
}

impl AppOptions {
    /// Defaults, then `sd_scrape.toml` (or `path`) if it exists, then env.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        let mut opts = if path.is_file() {
            let text = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
            logd!("Config: loaded {}", path.display());
            Self::from_toml_str(&text)?
        } else {
            Self::default()
        };
        opts.apply_env_from(|k| std::env::var(k).ok());
        Ok(opts)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Overlay `SD_SCRAPE_BASE_URL` / `SD_SCRAPE_MOCK`. Takes the lookup so tests
    /// don't have to touch the process environment.
    pub fn apply_env_from(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.source.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(flag) = var(ENV_MOCK) {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.source.mode = SourceMode::Mock,
                "0" | "false" | "no" | "off" => self.source.mode = SourceMode::Http,
                other => logw!("Config: ignoring {ENV_MOCK}={other:?}"),
            }
        }
    }
}

/* ---------------- Source ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    Mock,
    #[default]
    Http,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    pub mode: SourceMode,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Simulated round trip for the mock source.
    pub mock_latency_ms: u64,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            mode: SourceMode::default(),
            base_url: s!(DEFAULT_BASE_URL),
            timeout_secs: HTTP_TIMEOUT_SECS,
            mock_latency_ms: 0,
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Tsv, ExportFormat::Xlsx];

    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv", ExportFormat::Xlsx => "xlsx" }
    }

    /// Field delimiter for the delimited formats.
    pub fn delim(&self) -> Option<u8> {
        match self { ExportFormat::Csv => Some(b','), ExportFormat::Tsv => Some(b'\t'), ExportFormat::Xlsx => None }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" | "tab" => Ok(ExportFormat::Tsv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(format!("unknown export format: {other} (expected csv, tsv or xlsx)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    /// Formats rendered in-process. Anything else must be a file the source renders.
    pub local_formats: Vec<ExportFormat>,
    /// Render from the complete download instead of the (limited) cached rows.
    pub full_download: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            local_formats: ExportFormat::ALL.to_vec(),
            full_download: false,
        }
    }
}

impl ExportOptions {
    #[inline]
    pub fn is_local(&self, format: ExportFormat) -> bool {
        self.local_formats.contains(&format)
    }
}

/* ---------------- Filter ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    pub provinsi: String,
    pub kabkota: String,
    pub limit: u32,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self { provinsi: s!(PROVINSI), kabkota: s!(KABKOTA), limit: DEFAULT_LIMIT }
    }
}
