// src/xlsx.rs
//! Minimal single-sheet XLSX writer: a zip of five SpreadsheetML parts.
//! Text goes in as inline strings, numbers as numbers, blanks are skipped.

use std::borrow::Cow;
use std::fmt::Display;
use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::config::consts::{SHEET_NAME, XLSX_MIN_WIDTH, XLSX_WIDTH_PAD};
use crate::data::Value;
use crate::error::ExportError;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const CONTENT_TYPES: &str = "[Content_Types].xml";
const ROOT_RELS: &str = "_rels/.rels";
const WORKBOOK: &str = "xl/workbook.xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const SHEET: &str = "xl/worksheets/sheet1.xml";

type Xml = Writer<Vec<u8>>;

fn xml_err<E: Display>(e: E) -> ExportError {
    ExportError::Xlsx(e.to_string())
}

/// Whole workbook as bytes. `rows` must be as wide as `headers`.
pub fn write_sheet(headers: &[String], rows: &[Vec<Value>]) -> Result<Vec<u8>, ExportError> {
    let widths = column_widths(headers, rows);

    let parts: [(&str, Vec<u8>); 5] = [
        (CONTENT_TYPES, content_types()?),
        (ROOT_RELS, root_rels()?),
        (WORKBOOK, workbook()?),
        (WORKBOOK_RELS, workbook_rels()?),
        (SHEET, worksheet(headers, rows, &widths)?),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, body) in parts {
        zip.start_file(name, opts)?;
        zip.write_all(&body)?;
    }
    Ok(zip.finish()?.into_inner())
}

/// `max(XLSX_MIN_WIDTH, widest rendered cell incl. header) + XLSX_WIDTH_PAD`, in chars.
pub fn column_widths(headers: &[String], rows: &[Vec<Value>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(c, h)| {
            let widest = rows
                .iter()
                .filter_map(|r| r.get(c))
                .map(|v| v.to_text().chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0);
            widest.max(XLSX_MIN_WIDTH) + XLSX_WIDTH_PAD
        })
        .collect()
}

/// 0 -> A, 25 -> Z, 26 -> AA
pub fn col_letters(mut idx: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (idx % 26) as u8);
        if idx < 26 { break; }
        idx = idx / 26 - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/* ---------------- Parts ---------------- */

fn doc() -> Result<Xml, ExportError> {
    let mut w = Writer::new(Vec::new());
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)?;
    Ok(w)
}

fn start(w: &mut Xml, el: BytesStart<'_>) -> Result<(), ExportError> {
    w.write_event(Event::Start(el)).map_err(xml_err)
}

fn empty(w: &mut Xml, el: BytesStart<'_>) -> Result<(), ExportError> {
    w.write_event(Event::Empty(el)).map_err(xml_err)
}

fn end(w: &mut Xml, name: &str) -> Result<(), ExportError> {
    w.write_event(Event::End(BytesEnd::new(name))).map_err(xml_err)
}

fn text(w: &mut Xml, s: &str) -> Result<(), ExportError> {
    w.write_event(Event::Text(BytesText::new(&xml_safe(s)))).map_err(xml_err)
}

/// Drop characters XML 1.0 cannot carry at all (C0 controls other than tab,
/// LF and CR, plus U+FFFE/U+FFFF). Escaping can't save them; Excel refuses
/// the whole part.
pub fn xml_safe(s: &str) -> Cow<'_, str> {
    let bad = |c: char| (c < ' ' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}');
    if s.chars().any(bad) {
        Cow::Owned(s.chars().filter(|&c| !bad(c)).collect())
    } else {
        Cow::Borrowed(s)
    }
}

fn el<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut e = BytesStart::new(name);
    for a in attrs {
        e.push_attribute(*a);
    }
    e
}

fn content_types() -> Result<Vec<u8>, ExportError> {
    let mut w = doc()?;
    start(&mut w, el("Types", &[("xmlns", NS_CT)]))?;
    empty(&mut w, el("Default", &[
        ("Extension", "rels"),
        ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
    ]))?;
    empty(&mut w, el("Default", &[("Extension", "xml"), ("ContentType", "application/xml")]))?;
    empty(&mut w, el("Override", &[
        ("PartName", "/xl/workbook.xml"),
        ("ContentType", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"),
    ]))?;
    empty(&mut w, el("Override", &[
        ("PartName", "/xl/worksheets/sheet1.xml"),
        ("ContentType", "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"),
    ]))?;
    end(&mut w, "Types")?;
    Ok(w.into_inner())
}

fn relationships(target_type: &str, target: &str) -> Result<Vec<u8>, ExportError> {
    let mut w = doc()?;
    start(&mut w, el("Relationships", &[("xmlns", NS_PKG_REL)]))?;
    empty(&mut w, el("Relationship", &[("Id", "rId1"), ("Type", target_type), ("Target", target)]))?;
    end(&mut w, "Relationships")?;
    Ok(w.into_inner())
}

fn root_rels() -> Result<Vec<u8>, ExportError> {
    relationships(
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
        WORKBOOK,
    )
}

fn workbook_rels() -> Result<Vec<u8>, ExportError> {
    relationships(
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet",
        "worksheets/sheet1.xml",
    )
}

fn workbook() -> Result<Vec<u8>, ExportError> {
    let mut w = doc()?;
    start(&mut w, el("workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)]))?;
    start(&mut w, el("sheets", &[]))?;
    empty(&mut w, el("sheet", &[("name", SHEET_NAME), ("sheetId", "1"), ("r:id", "rId1")]))?;
    end(&mut w, "sheets")?;
    end(&mut w, "workbook")?;
    Ok(w.into_inner())
}

fn worksheet(headers: &[String], rows: &[Vec<Value>], widths: &[usize]) -> Result<Vec<u8>, ExportError> {
    let mut w = doc()?;
    start(&mut w, el("worksheet", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)]))?;

    start(&mut w, el("cols", &[]))?;
    for (i, width) in widths.iter().enumerate() {
        let n = (i + 1).to_string();
        let width = width.to_string();
        empty(&mut w, el("col", &[("min", n.as_str()), ("max", n.as_str()), ("width", width.as_str()), ("customWidth", "1")]))?;
    }
    end(&mut w, "cols")?;

    start(&mut w, el("sheetData", &[]))?;
    let header_cells: Vec<Value> = headers.iter().map(|h| Value::Text(h.clone())).collect();
    for (r, cells) in std::iter::once(&header_cells).chain(rows).enumerate() {
        let rn = (r + 1).to_string();
        start(&mut w, el("row", &[("r", rn.as_str())]))?;
        for (c, v) in cells.iter().enumerate() {
            cell(&mut w, &format!("{}{rn}", col_letters(c)), v)?;
        }
        end(&mut w, "row")?;
    }
    end(&mut w, "sheetData")?;

    end(&mut w, "worksheet")?;
    Ok(w.into_inner())
}

fn cell(w: &mut Xml, at: &str, v: &Value) -> Result<(), ExportError> {
    match v {
        Value::Null => Ok(()),
        Value::Text(t) if t.is_empty() => Ok(()),
        Value::Int(_) | Value::Float(_) if v.as_f64().is_some() => {
            start(w, el("c", &[("r", at)]))?;
            start(w, el("v", &[]))?;
            text(w, &v.to_text())?;
            end(w, "v")?;
            end(w, "c")
        }
        Value::Bool(b) => {
            start(w, el("c", &[("r", at), ("t", "b")]))?;
            start(w, el("v", &[]))?;
            text(w, if *b { "1" } else { "0" })?;
            end(w, "v")?;
            end(w, "c")
        }
        other => {
            start(w, el("c", &[("r", at), ("t", "inlineStr")]))?;
            start(w, el("is", &[]))?;
            start(w, el("t", &[("xml:space", "preserve")]))?;
            text(w, &other.to_text())?;
            end(w, "t")?;
            end(w, "is")?;
            end(w, "c")
        }
    }
}
