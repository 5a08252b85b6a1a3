// src/source/http.rs
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use super::DataSource;
use crate::config::options::{ExportFormat, SourceOptions};
use crate::data::Row;
use crate::error::RemoteQueryError;
use crate::filter::QueryPayload;

const USER_AGENT: &str = concat!("sd_scrape/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the scraping backend. One request per action; the
/// backend may take minutes on a large area, hence the long timeout.
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(opts: &SourceOptions) -> Result<Self, RemoteQueryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(opts.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: opts.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn post(&self, path: &str, body: &impl serde::Serialize) -> Result<Response, RemoteQueryError> {
        let url = self.url(path);
        logd!("HTTP: POST {url}");
        let resp = self.client.post(&url).json(body).send()?;
        check_status(resp)
    }

    fn post_rows(&self, path: &str, payload: &QueryPayload) -> Result<Vec<Row>, RemoteQueryError> {
        let bytes = self.post(path, payload)?.bytes()?;
        let rows = decode_rows(&bytes)?;
        logf!("HTTP: {} rows for {} via /{path}", rows.len(), payload.kecamatan);
        Ok(rows)
    }
}

/// Map a non-2xx response to `Server`, carrying the body's `error` text if any.
fn check_status(resp: Response) -> Result<Response, RemoteQueryError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    let message = server_message(&body).unwrap_or_else(|| {
        status.canonical_reason().map(str::to_string).unwrap_or_else(|| status.to_string())
    });
    Err(RemoteQueryError::Server { status: status.as_u16(), message })
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

/// Row payloads seen in the wild.
#[derive(Deserialize)]
#[serde(untagged)]
enum RowsEnvelope {
    Rows { rows: Vec<Row> },
    Data { data: Vec<Row> },
    Bare(Vec<Row>),
}

pub(crate) fn decode_rows(body: &[u8]) -> Result<Vec<Row>, RemoteQueryError> {
    Ok(match serde_json::from_slice::<RowsEnvelope>(body)? {
        RowsEnvelope::Rows { rows } => rows,
        RowsEnvelope::Data { data } => data,
        RowsEnvelope::Bare(rows) => rows,
    })
}

impl DataSource for HttpSource {
    fn name(&self) -> &'static str { "http" }

    fn fetch_area_list(&self) -> Vec<String> {
        let url = self.url("kecamatan");
        let res = self
            .client
            .get(&url)
            .send()
            .map_err(RemoteQueryError::from)
            .and_then(check_status)
            .and_then(|r| r.json::<Vec<String>>().map_err(RemoteQueryError::from));
        match res {
            Ok(list) => {
                logd!("HTTP: {} area names", list.len());
                list
            }
            Err(e) => {
                logw!("HTTP: area list unavailable: {e}");
                Vec::new()
            }
        }
    }

    /// `/preview`; the backend caps this at 2000 rows.
    fn fetch_rows(&self, payload: &QueryPayload) -> Result<Vec<Row>, RemoteQueryError> {
        self.post_rows("preview", payload)
    }

    /// `/download` answers with the same JSON envelope, uncapped.
    fn fetch_full_rows(&self, payload: &QueryPayload) -> Result<Vec<Row>, RemoteQueryError> {
        self.post_rows("download", payload)
    }

    /// The backend never renders files.
    fn fetch_export(&self, _payload: &QueryPayload, format: ExportFormat) -> Result<Vec<u8>, RemoteQueryError> {
        Err(RemoteQueryError::Unsupported(format!("{format} download")))
    }

    fn remote_formats(&self) -> &[ExportFormat] { &[] }
}
