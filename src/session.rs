// src/session.rs
//! One user's working state: filter, cache, source, area list.
//! Frontends drive everything through this.

use std::sync::Arc;

use crate::config::{consts::PREVIEW_ROWS, options::{AppOptions, ExportFormat}};
use crate::data::Row;
use crate::error::{ExportError, Result};
use crate::export::{self, Column, ColumnSpec};
use crate::file::{export_file_name, FileSink, Saved};
use crate::filter::{suggest, FilterParams, QueryPayload};
use crate::process::process;
use crate::progress::Progress;
use crate::source::{self, DataSource};
use crate::stats::{self, Stats};
use crate::store::QueryCache;

/// First rows of the cached result, `No` first.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    /// Rows in the cache, not just the ones shown.
    pub total: usize,
}

pub struct Session {
    options: AppOptions,
    pub filter: FilterParams,
    cache: QueryCache,
    source: Box<dyn DataSource>,
    areas: Vec<String>,
}

impl Session {
    pub fn new(options: AppOptions, source: Box<dyn DataSource>) -> Self {
        let filter = FilterParams::new(&options.filter);
        Self { options, filter, cache: QueryCache::new(), source, areas: Vec::new() }
    }

    /// Source picked from `options.source`.
    pub fn from_options(options: AppOptions) -> Result<Self> {
        let src = source::from_options(&options.source)?;
        logf!("Session: using {} source", src.name());
        Ok(Self::new(options, src))
    }

    pub fn options(&self) -> &AppOptions { &self.options }
    pub fn options_mut(&mut self) -> &mut AppOptions { &mut self.options }
    pub fn source_name(&self) -> &'static str { self.source.name() }
    pub fn cache(&self) -> &QueryCache { &self.cache }

    /// Fetch the autocomplete list. Returns how many names came back.
    pub fn load_areas(&mut self) -> usize {
        self.areas = self.source.fetch_area_list();
        self.areas.len()
    }

    pub fn areas(&self) -> &[String] { &self.areas }

    pub fn suggestions(&self) -> Vec<&str> {
        suggest(&self.filter.area_name, &self.areas)
    }

    /// Forced fetch for the current filter. Replaces the cache entry on success.
    pub fn start_scrape(&mut self, progress: &mut dyn Progress) -> Result<Arc<[Row]>> {
        progress.begin(&format!(
            "{} ({} fields, limit {})",
            self.filter.area(),
            self.filter.selected_fields().len(),
            self.filter.limit
        ));
        progress.log(&format!("Waiting for the {} source", self.source.name()));
        match self.cache.get_rows(self.source.as_ref(), &self.filter, true) {
            Ok(rows) => {
                progress.finish(rows.len());
                Ok(rows)
            }
            Err(e) => {
                progress.failed(&e.user_message());
                Err(e)
            }
        }
    }

    /// Cached rows for the current filter, fetching on a miss.
    pub fn rows(&mut self) -> Result<Arc<[Row]>> {
        self.cache.get_rows(self.source.as_ref(), &self.filter, false)
    }

    /// Cached rows only if they belong to the current filter. Never fetches.
    pub fn cached_rows(&self) -> Option<Arc<[Row]>> {
        self.cache.peek(&self.filter.cache_key())
    }

    pub fn preview(&mut self) -> Result<Preview> {
        let rows = self.rows()?;
        let columns = ColumnSpec::Numbered(self.filter.selected_fields()).columns();
        let shown = rows
            .iter()
            .take(PREVIEW_ROWS)
            .map(|r| columns.iter().map(|c| r.text(c.key)).collect())
            .collect();
        Ok(Preview { columns, rows: shown, total: rows.len() })
    }

    /// Every row for the current filter from the source's full download,
    /// processed like a fetch. Never touches the cache, which stays the
    /// limited preview result.
    pub fn full_rows(&self) -> Result<Arc<[Row]>> {
        self.filter.validate()?;
        let payload = QueryPayload { limit: None, ..self.filter.payload() };
        logf!("Export: full download for {}", payload.kecamatan);
        let raw = self.source.fetch_full_rows(&payload)?;
        Ok(process(raw, &self.filter.selected_fields()).into())
    }

    /// Drop the cached result ("clear preview").
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Recomputed from the live cache entry on every call.
    pub fn stats(&self) -> Option<Stats> {
        self.cache.rows().and_then(|rows| stats::compute_stats(&rows))
    }

    /// Locally rendered formats use the cached rows (fetching on a miss), or
    /// the complete download when `export.full_download` is set. Anything else
    /// must be a file the source renders, or fails as unsupported.
    pub fn export(&mut self, format: ExportFormat, spec: &ColumnSpec, sink: &mut dyn FileSink) -> Result<Saved> {
        self.filter.validate()?;
        let area = s!(self.filter.area());

        if self.options.export.is_local(format) {
            let rows = if self.options.export.full_download { self.full_rows()? } else { self.rows()? };
            return Ok(export::export(&rows, spec, format, &area, sink)?);
        }

        if !self.source.supports_remote(format) {
            logw!("Export: {format} is neither local nor offered by {}", self.source.name());
            return Err(ExportError::UnsupportedFormat(format).into());
        }
        logf!("Export: asking {} for {format}", self.source.name());
        let bytes = self.source.fetch_export(&self.filter.payload(), format)?;
        if bytes.is_empty() {
            return Err(ExportError::NoRows.into());
        }
        Ok(sink.save(&export_file_name(&area, format), format, &bytes)?)
    }

    /// Column layout for a selected-columns-only export.
    pub fn selected_columns(&self) -> ColumnSpec {
        ColumnSpec::Selected(self.filter.selected_fields())
    }
}
