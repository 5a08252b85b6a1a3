// tests/http_backend.rs
//
// HttpSource against a one-shot local server speaking the backend's JSON.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use sd_scrape::config::options::{AppOptions, ExportFormat, SourceOptions};
use sd_scrape::error::{Error, ExportError, RemoteQueryError};
use sd_scrape::export::ColumnSpec;
use sd_scrape::file::{FileSink, Saved};
use sd_scrape::session::Session;
use sd_scrape::source::HttpSource;

#[derive(Default)]
struct Recorder {
    saves: Vec<(String, Vec<u8>)>,
}

impl FileSink for Recorder {
    fn save(&mut self, file_name: &str, _format: ExportFormat, bytes: &[u8]) -> Result<Saved, ExportError> {
        self.saves.push((file_name.into(), bytes.to_vec()));
        Ok(Saved { file_name: file_name.into(), location: "memory".into(), path: None, bytes: bytes.len() })
    }
}

/// Answers exactly one request with `status` and a JSON `body`.
/// The handle yields the request line plus the request body.
fn serve_once(status: &str, body: &'static str) -> (String, JoinHandle<(String, String)>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let status = status.to_string();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() { break; }
            if let Some((k, v)) = line.split_once(':') {
                if k.eq_ignore_ascii_case("content-length") {
                    content_length = v.trim().parse().unwrap();
                }
            }
        }
        let mut req_body = vec![0u8; content_length];
        reader.read_exact(&mut req_body).unwrap();

        let mut stream = reader.into_inner();
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
        (request_line.trim_end().to_string(), String::from_utf8(req_body).unwrap())
    });
    (base, handle)
}

fn http_session(base_url: String, options: AppOptions) -> Session {
    let src = HttpSource::new(&SourceOptions { base_url, ..SourceOptions::default() }).unwrap();
    let mut s = Session::new(options, Box::new(src));
    s.filter.area_name = "Bawen".into();
    s.filter = s.filter.clone().with_fields(&["nama_sekolah"]).unwrap();
    s
}

#[test]
fn full_download_is_rendered_locally_from_json_rows() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"rows":[{"Nama Sekolah":"SD N 2"},{"Nama Sekolah":"SD N 1"}]}"#,
    );
    let mut opts = AppOptions::default();
    opts.export.full_download = true;
    let mut s = http_session(base, opts);
    let mut rec = Recorder::default();

    let spec = s.selected_columns();
    let saved = s.export(ExportFormat::Csv, &spec, &mut rec).unwrap();
    assert_eq!(saved.file_name, "data_sd_Bawen.csv");

    let text = String::from_utf8(rec.saves[0].1.clone()).unwrap();
    assert_eq!(text, "\"Nama Sekolah\"\n\"SD N 1\"\n\"SD N 2\"\n");
    assert!(!text.contains("rows"));

    let (request_line, body) = server.join().unwrap();
    assert!(request_line.starts_with("POST /download "));
    assert!(body.contains("\"kecamatan\":\"Bawen\""));
    assert!(!body.contains("limit"));
}

#[test]
fn preview_decodes_rows_and_canonicalizes() {
    let (base, server) = serve_once("200 OK", r#"{"rows":[{"Nama Sekolah":"SD N 9"}]}"#);
    let mut s = http_session(base, AppOptions::default());

    let rows = s.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text("nama_sekolah"), "SD N 9");

    let (request_line, body) = server.join().unwrap();
    assert!(request_line.starts_with("POST /preview "));
    assert!(body.contains("\"limit\":200"));
}

#[test]
fn server_error_message_reaches_the_user() {
    let (base, server) = serve_once("400 Bad Request", r#"{"error":"Kecamatan tidak ditemukan"}"#);
    let mut s = http_session(base, AppOptions::default());

    let err = s.rows().unwrap_err();
    assert_eq!(
        err,
        Error::Remote(RemoteQueryError::Server { status: 400, message: "Kecamatan tidak ditemukan".into() })
    );
    assert!(s.cache().entry().is_none());
    server.join().unwrap();
}

#[test]
fn non_local_format_is_refused_without_a_request() {
    // Nothing listens here; a request would fail as a network error instead.
    let mut opts = AppOptions::default();
    opts.export.local_formats.clear();
    let mut s = http_session("http://127.0.0.1:9".into(), opts);
    let mut rec = Recorder::default();

    for format in ExportFormat::ALL {
        let err = s.export(format, &ColumnSpec::Canonical, &mut rec).unwrap_err();
        assert_eq!(err, Error::Export(ExportError::UnsupportedFormat(format)));
    }
    assert!(rec.saves.is_empty());
}
