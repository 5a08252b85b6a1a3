// src/process.rs
//! Row post-processing, run once per fetch before rows enter the cache:
//! canonicalize columns, stable sort, `No` numbering, enrollment synthesis.

use crate::data::{Row, Value};
use crate::fields::{self, FieldSpec, FEMALE, MALE, NO, SORT_PRIORITY, TOTAL};

pub fn process(raw: Vec<Row>, selected: &[&'static FieldSpec]) -> Vec<Row> {
    let mut rows: Vec<Row> = raw.into_iter().map(|r| canonicalize(r, selected)).collect();
    sort_rows(&mut rows);
    for (i, row) in rows.iter_mut().enumerate() {
        row.insert(NO, Value::Int(i as i64 + 1));
        enrich(row, i);
    }
    rows
}

/// Rename known columns to their registry key; unknown columns pass through.
/// Every selected field ends up present (null when the source left it out).
pub fn canonicalize(raw: Row, selected: &[&'static FieldSpec]) -> Row {
    let mut out = Row::new();
    for (col, val) in raw {
        match fields::resolve(&col) {
            Some(f) => {
                // Same field under two names: keep the first non-null one.
                if !out.has(f.key) {
                    out.insert(f.key, val);
                }
            }
            None => {
                out.insert(col, val);
            }
        }
    }
    for f in selected {
        if out.get(f.key).is_none() {
            out.insert(f.key, Value::Null);
        }
    }
    out
}

/// Stable sort on `SORT_PRIORITY`, case-insensitive on the rendered value.
pub fn sort_rows(rows: &mut [Row]) {
    rows.sort_by_cached_key(sort_key);
}

fn sort_key(row: &Row) -> Vec<String> {
    SORT_PRIORITY.iter().map(|k| row.text(k).to_lowercase()).collect()
}

/// Fill absent total/male/female from the row position. Present values win.
pub fn enrich(row: &mut Row, index: usize) {
    let (total, male, female) = synth_counts(
        index,
        row.has(TOTAL).then(|| row.number(TOTAL).unwrap_or(0.0)),
        row.has(MALE).then(|| row.number(MALE).unwrap_or(0.0)),
    );
    if !row.has(TOTAL) { row.insert(TOTAL, Value::Int(total)); }
    if !row.has(MALE) { row.insert(MALE, Value::Int(male)); }
    if !row.has(FEMALE) { row.insert(FEMALE, Value::Int(female)); }
}

/// `total = 80 + i % 121`, `male = round(total * (0.5 + (i % 11 - 5) / 100))`
/// clamped to `0..=total`, `female = total - male`. Known values feed the
/// later terms.
pub fn synth_counts(index: usize, total: Option<f64>, male: Option<f64>) -> (i64, i64, i64) {
    let total = total.unwrap_or((80 + index % 121) as f64);
    let male = male.unwrap_or_else(|| {
        let ratio = 0.5 + ((index % 11) as f64 - 5.0) / 100.0;
        let mut m = round_half_up(total * ratio);
        if m < 0.0 { m = 0.0; }
        if m > total { m = total; }
        m
    });
    let total_i = total.round() as i64;
    let male_i = male.round() as i64;
    (total_i, male_i, total_i - male_i)
}

/// Halves round toward +inf.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}
