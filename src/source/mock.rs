// src/source/mock.rs
use std::{thread, time::Duration};

use super::DataSource;
use crate::config::{consts::*, options::{ExportFormat, SourceOptions}};
use crate::data::{Row, Value};
use crate::error::RemoteQueryError;
use crate::fields;
use crate::filter::QueryPayload;

/// Offline stand-in for the backend. Same inputs, same rows, every time.
pub struct MockSource {
    latency: Duration,
}

impl MockSource {
    pub fn new(opts: &SourceOptions) -> Self {
        Self { latency: Duration::from_millis(opts.mock_latency_ms) }
    }

    fn wait(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }

    /// Backend-style request checks.
    fn check(payload: &QueryPayload) -> Result<(), RemoteQueryError> {
        let bad = |m: &str| Err(RemoteQueryError::Server { status: 400, message: s!(m) });
        if payload.kecamatan.trim().is_empty() {
            return bad("Kecamatan wajib diisi");
        }
        if payload.fields.is_empty() {
            return bad("Minimal 1 field wajib dipilih");
        }
        Ok(())
    }

    fn generate(&self, payload: &QueryPayload, limit: usize) -> Result<Vec<Row>, RemoteQueryError> {
        Self::check(payload)?;
        self.wait();
        let rows: Vec<Row> = mock_rows(&payload.kecamatan, &payload.provinsi, &payload.kabkota, limit)
            .into_iter()
            .map(|r| project(r, &payload.fields))
            .collect();
        logd!("Mock: {} rows for {}", rows.len(), payload.kecamatan);
        Ok(rows)
    }
}

impl Default for MockSource {
    fn default() -> Self { Self { latency: Duration::ZERO } }
}

/// Full generated records, keyed by registry key. At most `MOCK_MAX_ROWS`.
/// An empty area spreads rows over `MOCK_AREAS`.
pub fn mock_rows(area: &str, provinsi: &str, kabkota: &str, limit: usize) -> Vec<Row> {
    let area = area.trim();
    let areas: Vec<&str> = if area.is_empty() { MOCK_AREAS.to_vec() } else { vec![area] };

    (0..limit.min(MOCK_MAX_ROWS))
        .map(|i| {
            let kc = areas[i % areas.len()];
            let total = 80 + (i % 121) as i64;
            let male = (total as f64 * (0.48 + (i % 7) as f64 / 100.0)).round() as i64;
            let female = (total - male).max(0);
            let step = (i % 50) as f64 * 0.002;

            let mut r = Row::new();
            r.insert("npsn", format!("{}", 120_000 + i));
            r.insert("nama_sekolah", format!("SD Negeri {} {kc}", i + 1));
            r.insert("alamat", format!("Jl. Contoh No.{}", i + 1));
            r.insert("kecamatan", kc);
            r.insert("kabkota", kabkota);
            r.insert("provinsi", provinsi);
            r.insert("latitude", -7.15 - step);
            r.insert("longitude", 110.42 + step);
            r.insert("jumlah_siswa", total);
            r.insert("siswa_laki", male);
            r.insert("siswa_perempuan", female);
            r
        })
        .collect()
}

/// Keep only the requested columns, renamed to the backend names asked for.
/// Fields the generator has no data for come back null.
fn project(full: Row, wanted: &[String]) -> Row {
    wanted
        .iter()
        .map(|name| {
            let v = fields::resolve(name)
                .and_then(|f| full.get(f.key).cloned())
                .unwrap_or(Value::Null);
            (name.clone(), v)
        })
        .collect()
}

impl DataSource for MockSource {
    fn name(&self) -> &'static str { "mock" }

    fn fetch_area_list(&self) -> Vec<String> {
        KECAMATAN_KAB_SEMARANG.iter().map(|s| s!(*s)).collect()
    }

    fn fetch_rows(&self, payload: &QueryPayload) -> Result<Vec<Row>, RemoteQueryError> {
        let limit = payload.limit.unwrap_or(DEFAULT_LIMIT) as usize;
        self.generate(payload, limit)
    }

    /// The whole generated set for the area, whatever the payload's limit.
    fn fetch_full_rows(&self, payload: &QueryPayload) -> Result<Vec<Row>, RemoteQueryError> {
        self.generate(payload, MOCK_MAX_ROWS)
    }

    /// CSV only; headers are the requested backend names.
    fn fetch_export(&self, payload: &QueryPayload, format: ExportFormat) -> Result<Vec<u8>, RemoteQueryError> {
        if !self.supports_remote(format) {
            return Err(RemoteQueryError::Unsupported(format!("{format} download")));
        }
        let rows = self.fetch_rows(payload)?;
        let table: Vec<Vec<String>> = rows
            .iter()
            .map(|r| payload.fields.iter().map(|h| r.text(h)).collect())
            .collect();
        crate::csv::write_table(&payload.fields, &table, b',')
            .map_err(|e| RemoteQueryError::Decode(e.to_string()))
    }

    fn remote_formats(&self) -> &[ExportFormat] { &[ExportFormat::Csv] }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(area: &str, fields: &[&str], limit: u32) -> QueryPayload {
        QueryPayload {
            provinsi: s!(PROVINSI),
            kabkota: s!(KABKOTA),
            kecamatan: s!(area),
            fields: fields.iter().map(|f| s!(*f)).collect(),
            limit: Some(limit),
        }
    }

    #[test]
    fn generator_shape() {
        let rows = mock_rows("", PROVINSI, KABKOTA, 10_000);
        assert_eq!(rows.len(), MOCK_MAX_ROWS);
        assert_eq!(rows[0].text("nama_sekolah"), "SD Negeri 1 Banyubiru");
        assert_eq!(rows[1].text("kecamatan"), "Ambarawa");
        assert_eq!(rows[7].text("npsn"), "120007");
        for r in &rows {
            let t = r.number("jumlah_siswa").unwrap();
            let m = r.number("siswa_laki").unwrap();
            assert!(m >= 0.0 && m <= t);
            assert_eq!(r.number("siswa_perempuan").unwrap(), t - m);
        }
    }

    #[test]
    fn projects_to_backend_names() {
        let src = MockSource::default();
        let rows = src.fetch_rows(&payload("Bawen", &["Nama Sekolah", "NPSN", "Telepon"], 3)).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].text("Nama Sekolah"), "SD Negeri 3 Bawen");
        assert_eq!(rows[2].get("Telepon"), Some(&Value::Null));
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn rejects_like_the_backend() {
        let src = MockSource::default();
        let err = src.fetch_rows(&payload(" ", &["NPSN"], 3)).unwrap_err();
        assert_eq!(err, RemoteQueryError::Server { status: 400, message: s!("Kecamatan wajib diisi") });
        assert!(src.fetch_rows(&payload("Bawen", &[], 3)).is_err());
    }

    #[test]
    fn csv_download_only() {
        let src = MockSource::default();
        let p = payload("Bawen", &["NPSN", "Nama Sekolah"], 2);
        let bytes = src.fetch_export(&p, ExportFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("\"NPSN\",\"Nama Sekolah\"\n"));
        assert!(matches!(src.fetch_export(&p, ExportFormat::Xlsx), Err(RemoteQueryError::Unsupported(_))));
    }

    #[test]
    fn full_rows_ignore_the_limit() {
        let src = MockSource::default();
        let p = payload("Bawen", &["NPSN"], 3);
        assert_eq!(src.fetch_rows(&p).unwrap().len(), 3);
        let full = src.fetch_full_rows(&p).unwrap();
        assert_eq!(full.len(), MOCK_MAX_ROWS);
        assert_eq!(full[0].len(), 1);
        assert!(src.fetch_full_rows(&payload(" ", &["NPSN"], 3)).is_err());
    }

    #[test]
    fn area_list_is_the_regency() {
        let list = MockSource::default().fetch_area_list();
        assert_eq!(list.len(), 19);
        assert!(list.iter().any(|a| a == "Ungaran Timur"));
    }
}
