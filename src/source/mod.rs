// src/source/mod.rs
//! Data sources: where rows come from.
//!
//! - `HttpSource`: the scraping backend (`/kecamatan`, `/preview`, `/download`).
//!   It serves rows only; every file is rendered locally.
//! - `MockSource`: deterministic generator standing in for the backend.

mod http;
mod mock;

pub use http::HttpSource;
pub use mock::{mock_rows, MockSource};

use crate::config::options::{ExportFormat, SourceMode, SourceOptions};
use crate::data::Row;
use crate::error::RemoteQueryError;
use crate::filter::QueryPayload;

pub trait DataSource {
    /// Short name for logs and the status line.
    fn name(&self) -> &'static str;

    /// Reference list of area names for autocomplete. Failures degrade to empty.
    fn fetch_area_list(&self) -> Vec<String>;

    /// Rows for a query, as the source names the columns.
    fn fetch_rows(&self, payload: &QueryPayload) -> Result<Vec<Row>, RemoteQueryError>;

    /// Every row for the area, ignoring the preview limit. Used by full exports.
    fn fetch_full_rows(&self, payload: &QueryPayload) -> Result<Vec<Row>, RemoteQueryError>;

    /// A rendered file produced by the source itself.
    fn fetch_export(&self, payload: &QueryPayload, format: ExportFormat) -> Result<Vec<u8>, RemoteQueryError>;

    /// Formats `fetch_export` can produce. Empty for sources that only serve rows.
    fn remote_formats(&self) -> &[ExportFormat];

    fn supports_remote(&self, format: ExportFormat) -> bool {
        self.remote_formats().contains(&format)
    }
}

/// Build the configured source.
pub fn from_options(opts: &SourceOptions) -> Result<Box<dyn DataSource>, RemoteQueryError> {
    Ok(match opts.mode {
        SourceMode::Mock => Box::new(MockSource::new(opts)),
        SourceMode::Http => Box::new(HttpSource::new(opts)?),
    })
}
