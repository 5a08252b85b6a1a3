// src/csv.rs
//! Delimited text output (CSV/TSV) on top of the `csv` crate.
//!
//! Every cell is quoted, embedded quotes doubled, lines end in `\n`.
//! Delimiters, quotes and newlines inside values can't break a row.

use std::io::Write;

use ::csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::error::ExportError;

fn writer<W: Write>(out: W, delim: u8) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(delim)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(false)
        .from_writer(out)
}

/// Stream header + rows into `out`. Rows must be as wide as the header.
pub fn write_to<W, H, R>(out: W, headers: &[H], rows: R, delim: u8) -> Result<(), ExportError>
where
    W: Write,
    H: AsRef<[u8]>,
    R: IntoIterator,
    R::Item: IntoIterator,
    <R::Item as IntoIterator>::Item: AsRef<[u8]>,
{
    let mut w = writer(out, delim);
    w.write_record(headers)?;
    for r in rows {
        w.write_record(r)?;
    }
    w.flush()?;
    Ok(())
}

/// In-memory variant of [`write_to`].
pub fn write_table<H: AsRef<[u8]>>(headers: &[H], rows: &[Vec<String>], delim: u8) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_to(&mut buf, headers, rows, delim)?;
    Ok(buf)
}
