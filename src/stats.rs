// src/stats.rs
//! Summary numbers for display. Pure functions of the row slice; callers
//! recompute on read instead of caching results.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::consts::{TOP_AREAS, UNKNOWN_AREA};
use crate::data::Row;
use crate::fields::{AREA, FEMALE, LAT, LON, MALE, NAME, TOTAL};
use crate::process::round_half_up;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stats {
    pub total_schools: usize,
    pub total_students: f64,
    pub total_male: f64,
    pub total_female: f64,
    pub avg_students: i64,
    pub avg_male: i64,
    pub avg_female: i64,
    /// Largest areas first, at most `TOP_AREAS`.
    pub by_area: Vec<AreaTotals>,
    pub has_geo: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaTotals {
    pub area: String,
    pub male: f64,
    pub female: f64,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    pub school: String,
    pub male: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeoPoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[inline]
fn num(row: &Row, key: &str) -> f64 { row.number(key).unwrap_or(0.0) }

/// `None` for no rows.
pub fn compute_stats(rows: &[Row]) -> Option<Stats> {
    if rows.is_empty() { return None; }

    let n = rows.len();
    let total_students: f64 = rows.iter().map(|r| num(r, TOTAL)).sum();
    let total_male: f64 = rows.iter().map(|r| num(r, MALE)).sum();
    let total_female: f64 = rows.iter().map(|r| num(r, FEMALE)).sum();

    Some(Stats {
        total_schools: n,
        total_students,
        total_male,
        total_female,
        avg_students: round_half_up(total_students / n as f64) as i64,
        avg_male: round_half_up(total_male / n as f64) as i64,
        avg_female: round_half_up(total_female / n as f64) as i64,
        by_area: by_area(rows),
        has_geo: rows.iter().any(|r| r.has(LAT) && r.has(LON)),
    })
}

/// Group by area (missing, blank or whitespace-only names share one
/// catch-all bucket), sum male/female,
/// sort by `male + female` descending. Ties keep first-seen order.
pub fn by_area(rows: &[Row]) -> Vec<AreaTotals> {
    let mut groups: Vec<AreaTotals> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for r in rows {
        let name = r.text(AREA);
        let name = if name.trim().is_empty() { s!(UNKNOWN_AREA) } else { name };
        let i = *index.entry(name.clone()).or_insert_with(|| {
            groups.push(AreaTotals { area: name, male: 0.0, female: 0.0, total: 0.0 });
            groups.len() - 1
        });
        groups[i].male += num(r, MALE);
        groups[i].female += num(r, FEMALE);
    }

    for g in &mut groups {
        g.total = g.male + g.female;
    }
    // stable
    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
    groups.truncate(TOP_AREAS);
    groups
}

/// One bar per school, row order.
pub fn chart_series(rows: &[Row]) -> Vec<ChartPoint> {
    rows.iter()
        .map(|r| ChartPoint { school: r.text(NAME), male: num(r, MALE) })
        .collect()
}

/// Map markers for rows that carry both coordinates.
pub fn geo_points(rows: &[Row]) -> Vec<GeoPoint> {
    rows.iter()
        .filter_map(|r| {
            Some(GeoPoint { name: r.text(NAME), lat: r.number(LAT)?, lon: r.number(LON)? })
        })
        .collect()
}
