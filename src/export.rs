// src/export.rs
//! Turn processed rows into a file: pick columns, render, hand to a sink.
//!
//! Rows are written in the order given; nothing here sorts. Column order
//! comes from the `ColumnSpec`, never from map iteration.

use crate::config::options::ExportFormat;
use crate::data::{Row, Value};
use crate::error::ExportError;
use crate::fields::{self, FieldSpec, CANONICAL_COLUMNS, NO};
use crate::file::{export_file_name, FileSink, Saved};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
}

impl Column {
    fn field(f: &'static FieldSpec) -> Self { Self { key: f.key, header: f.label } }
    fn no() -> Self { Self { key: NO, header: NO } }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnSpec {
    /// `No` followed by the fixed report layout.
    Canonical,
    /// Just these fields, in registry order.
    Selected(Vec<&'static FieldSpec>),
    /// `No`, then the selected fields in registry order. The preview layout.
    Numbered(Vec<&'static FieldSpec>),
}

impl ColumnSpec {
    pub fn columns(&self) -> Vec<Column> {
        match self {
            ColumnSpec::Canonical => std::iter::once(Column::no())
                .chain(CANONICAL_COLUMNS.iter().filter_map(|k| fields::get(k)).map(Column::field))
                .collect(),
            ColumnSpec::Selected(sel) => registry_order(sel).into_iter().map(Column::field).collect(),
            ColumnSpec::Numbered(sel) => {
                if sel.is_empty() { return Vec::new(); }
                std::iter::once(Column::no())
                    .chain(registry_order(sel).into_iter().map(Column::field))
                    .collect()
            }
        }
    }
}

fn registry_order(sel: &[&'static FieldSpec]) -> Vec<&'static FieldSpec> {
    fields::all().iter().filter(|f| sel.iter().any(|s| s.key == f.key)).collect()
}

/// Header + cells, ready for any writer.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Missing cells become empty text, so every row is as wide as the header.
    pub fn build(rows: &[Row], columns: &[Column]) -> Self {
        let headers = columns.iter().map(|c| s!(c.header)).collect();
        let rows = rows
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|c| match r.get(c.key) {
                        None | Some(Value::Null) => Value::Text(s!()),
                        Some(v) => v.clone(),
                    })
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|r| r.iter().map(Value::to_text).collect()).collect()
    }
}

/// Render to bytes. Errors on no rows or no columns.
pub fn render(rows: &[Row], spec: &ColumnSpec, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NoRows);
    }
    let columns = spec.columns();
    if columns.is_empty() {
        return Err(ExportError::NoColumns);
    }
    let table = Table::build(rows, &columns);
    match format.delim() {
        Some(d) => crate::csv::write_table(&table.headers, &table.text_rows(), d),
        None => crate::xlsx::write_sheet(&table.headers, &table.rows),
    }
}

/// Render and save under the standard name for `area`. The sink is only
/// touched once rendering succeeded.
pub fn export(
    rows: &[Row],
    spec: &ColumnSpec,
    format: ExportFormat,
    area: &str,
    sink: &mut dyn FileSink,
) -> Result<Saved, ExportError> {
    let bytes = render(rows, spec, format)?;
    let name = export_file_name(area, format);
    let saved = sink.save(&name, format, &bytes)?;
    logf!("Export: {} rows -> {}", rows.len(), saved.location);
    Ok(saved)
}
