// tests/export_files.rs
//
// Exports through a real directory sink, plus the "never write an empty file" rules.

use std::fs;
use std::io::{Cursor, Read};

use sd_scrape::config::options::{AppOptions, ExportFormat};
use sd_scrape::data::Row;
use sd_scrape::error::{Error, ExportError, RemoteQueryError};
use sd_scrape::export::ColumnSpec;
use sd_scrape::file::{DirSink, FileSink, Saved};
use sd_scrape::filter::QueryPayload;
use sd_scrape::session::Session;
use sd_scrape::source::{DataSource, MockSource};

/// Remembers every save instead of touching the disk.
#[derive(Default)]
struct Recorder {
    saves: Vec<(String, ExportFormat, Vec<u8>)>,
}

impl FileSink for Recorder {
    fn save(&mut self, file_name: &str, format: ExportFormat, bytes: &[u8]) -> Result<Saved, ExportError> {
        self.saves.push((file_name.into(), format, bytes.to_vec()));
        Ok(Saved { file_name: file_name.into(), location: "memory".into(), path: None, bytes: bytes.len() })
    }
}

/// A backend that answers every query with nothing.
struct Empty;

impl DataSource for Empty {
    fn name(&self) -> &'static str { "empty" }
    fn fetch_area_list(&self) -> Vec<String> { Vec::new() }
    fn fetch_rows(&self, _: &QueryPayload) -> Result<Vec<Row>, RemoteQueryError> { Ok(Vec::new()) }
    fn fetch_full_rows(&self, _: &QueryPayload) -> Result<Vec<Row>, RemoteQueryError> { Ok(Vec::new()) }
    fn fetch_export(&self, _: &QueryPayload, _: ExportFormat) -> Result<Vec<u8>, RemoteQueryError> {
        Ok(Vec::new())
    }
    fn remote_formats(&self) -> &[ExportFormat] { &[ExportFormat::Csv] }
}

fn mock_session(options: AppOptions, area: &str, limit: u32) -> Session {
    let mut s = Session::new(options, Box::new(MockSource::default()));
    s.filter.area_name = area.into();
    s.filter.set_limit(limit);
    s
}

fn field_counts(text: &str, delim: char) -> Vec<usize> {
    text.lines().map(|l| l.split(delim).count()).collect()
}

#[test]
fn csv_and_tsv_have_header_plus_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = mock_session(AppOptions::default(), "Tuntang", 25);

    for (format, delim) in [(ExportFormat::Csv, ','), (ExportFormat::Tsv, '\t')] {
        let mut sink = DirSink::new(dir.path());
        let saved = s.export(format, &ColumnSpec::Canonical, &mut sink).unwrap();
        assert_eq!(saved.file_name, format!("data_sd_Tuntang.{}", format.ext()));

        let text = fs::read_to_string(saved.path.unwrap()).unwrap();
        assert_eq!(text.lines().count(), 26);
        let counts = field_counts(&text, delim);
        assert!(counts.iter().all(|&n| n == counts[0]), "{format}: ragged rows");
        assert!(text.starts_with("\"No\""));
    }
    // Both formats came from one cached fetch.
    assert_eq!(s.cache().fetch_count(), 1);
}

#[test]
fn selected_columns_follow_the_filter() {
    let mut s = mock_session(AppOptions::default(), "Getasan", 4);
    s.filter = s.filter.clone().with_fields(&["npsn", "nama_sekolah"]).unwrap();

    let mut rec = Recorder::default();
    let spec = s.selected_columns();
    s.export(ExportFormat::Csv, &spec, &mut rec).unwrap();

    let text = String::from_utf8(rec.saves[0].2.clone()).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(header, "\"Nama Sekolah\",\"NPSN\"");
    assert_eq!(text.lines().count(), 5);
}

#[test]
fn xlsx_is_a_workbook_with_a_data_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = mock_session(AppOptions::default(), "Pabelan", 10);
    let mut sink = DirSink::new(dir.path().join("nested"));

    let saved = s.export(ExportFormat::Xlsx, &ColumnSpec::Canonical, &mut sink).unwrap();
    assert!(saved.file_name.ends_with(".xlsx"));

    let bytes = fs::read(saved.path.unwrap()).unwrap();
    assert_eq!(&bytes[..2], b"PK");
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

    let mut workbook = String::new();
    zip.by_name("xl/workbook.xml").unwrap().read_to_string(&mut workbook).unwrap();
    assert!(workbook.contains("name=\"Data\""));

    let mut sheet = String::new();
    zip.by_name("xl/worksheets/sheet1.xml").unwrap().read_to_string(&mut sheet).unwrap();
    assert_eq!(sheet.matches("<row ").count(), 11);
    assert!(sheet.contains("SD Negeri 1 Pabelan"));
}

#[test]
fn empty_result_never_reaches_the_sink() {
    let mut s = Session::new(AppOptions::default(), Box::new(Empty));
    s.filter.area_name = "Bawen".into();
    let mut rec = Recorder::default();

    for format in ExportFormat::ALL {
        let err = s.export(format, &ColumnSpec::Canonical, &mut rec).unwrap_err();
        assert_eq!(err, Error::Export(ExportError::NoRows));
    }
    s.options_mut().export.full_download = true;
    let err = s.export(ExportFormat::Csv, &ColumnSpec::Canonical, &mut rec).unwrap_err();
    assert_eq!(err, Error::Export(ExportError::NoRows));
    assert!(rec.saves.is_empty());
}

#[test]
fn no_columns_never_reaches_the_sink() {
    let mut s = mock_session(AppOptions::default(), "Bawen", 3);
    let mut rec = Recorder::default();

    let err = s.export(ExportFormat::Csv, &ColumnSpec::Selected(Vec::new()), &mut rec).unwrap_err();
    assert_eq!(err, Error::Export(ExportError::NoColumns));
    assert!(rec.saves.is_empty());
}

#[test]
fn invalid_filter_blocks_export() {
    let mut s = mock_session(AppOptions::default(), "  ", 3);
    let mut rec = Recorder::default();
    let err = s.export(ExportFormat::Csv, &ColumnSpec::Canonical, &mut rec).unwrap_err();
    assert!(err.is_user_input());
    assert!(rec.saves.is_empty());
    assert_eq!(s.cache().fetch_count(), 0);
}

#[test]
fn non_local_csv_is_downloaded_from_the_source() {
    let mut opts = AppOptions::default();
    opts.export.local_formats = vec![ExportFormat::Xlsx];
    let mut s = mock_session(opts, "Jambu", 6);
    s.filter = s.filter.clone().with_fields(&["nama_sekolah", "siswa_laki"]).unwrap();
    let mut rec = Recorder::default();

    let saved = s.export(ExportFormat::Csv, &ColumnSpec::Canonical, &mut rec).unwrap();
    assert_eq!(saved.file_name, "data_sd_Jambu.csv");
    // Rendered by the source: backend headers, no `No` column, no cache fill.
    let text = String::from_utf8(rec.saves[0].2.clone()).unwrap();
    assert_eq!(text.lines().next().unwrap(), "\"Nama Sekolah\",\"Jumlah Siswa Laki-laki\"");
    assert_eq!(text.lines().count(), 7);
    assert_eq!(s.cache().fetch_count(), 0);
}

#[test]
fn non_local_format_the_source_lacks_is_unsupported() {
    let mut opts = AppOptions::default();
    opts.export.local_formats = vec![ExportFormat::Csv];
    let mut s = mock_session(opts, "Jambu", 6);
    let mut rec = Recorder::default();

    for format in [ExportFormat::Tsv, ExportFormat::Xlsx] {
        let err = s.export(format, &ColumnSpec::Canonical, &mut rec).unwrap_err();
        assert_eq!(err, Error::Export(ExportError::UnsupportedFormat(format)));
    }
    assert!(rec.saves.is_empty());
}

#[test]
fn empty_remote_download_is_not_saved() {
    let mut opts = AppOptions::default();
    opts.export.local_formats.clear();
    let mut s = Session::new(opts, Box::new(Empty));
    s.filter.area_name = "Bawen".into();
    let mut rec = Recorder::default();

    let err = s.export(ExportFormat::Csv, &ColumnSpec::Canonical, &mut rec).unwrap_err();
    assert_eq!(err, Error::Export(ExportError::NoRows));
    assert!(rec.saves.is_empty());
}

#[test]
fn output_file_target_overrides_name() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("mine.csv");
    let mut sink = DirSink::for_target(&target.to_string_lossy(), dir.path());
    let mut s = mock_session(AppOptions::default(), "Bawen", 2);

    let saved = s.export(ExportFormat::Csv, &ColumnSpec::Canonical, &mut sink).unwrap();
    assert_eq!(saved.file_name, "mine.csv");
    assert!(target.is_file());
}
