// src/error.rs
//! Error types, one enum per failure domain plus the crate-wide [`Error`].

use thiserror::Error;

use crate::config::options::ExportFormat;

/// Bad filter input. Raised before anything reaches the data source.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("area name (kecamatan) is required")]
    MissingAreaName,

    #[error("select at least one field")]
    NoFieldsSelected,

    #[error("limit {value} is outside {min}..={max}")]
    LimitOutOfRange { value: u32, min: u32, max: u32 },

    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Transport, server or decode failure from a data source.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RemoteQueryError {
    /// Non-success status. `message` is the server's `error` field when it sent one.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("data source does not support {0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for RemoteQueryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Server { status: status.as_u16(), message: err.to_string() }
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RemoteQueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("nothing to export: no rows")]
    NoRows,

    #[error("nothing to export: no columns selected")]
    NoColumns,

    #[error("{0} export is not available from this data source")]
    UnsupportedFormat(ExportFormat),

    #[error("CSV writer error: {0}")]
    Csv(String),

    #[error("XLSX writer error: {0}")]
    Xlsx(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<::csv::Error> for ExportError {
    fn from(err: ::csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Xlsx(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteQueryError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Short message for alerts and status lines.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::MissingAreaName) => s!("Please enter a kecamatan first."),
            Self::Validation(ValidationError::NoFieldsSelected) => s!("Please select at least one field."),
            Self::Validation(e) => e.to_string(),
            Self::Remote(RemoteQueryError::Server { message, .. }) => format!("Backend error: {message}"),
            Self::Remote(RemoteQueryError::Network(_)) => {
                s!("Could not reach the backend. Is it running?")
            }
            Self::Remote(RemoteQueryError::Decode(_)) => s!("The backend sent a response that could not be read."),
            Self::Remote(e @ RemoteQueryError::Unsupported(_)) => e.to_string(),
            Self::Export(ExportError::NoRows) => s!("No data to export yet. Run a scrape first."),
            Self::Export(ExportError::NoColumns) => s!("No columns selected for export."),
            Self::Export(e) => format!("Export failed: {e}"),
            Self::Config(msg) => format!("Bad configuration: {msg}"),
        }
    }

    /// Input problems the user can fix in the form, as opposed to failures.
    #[must_use]
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Export(ExportError::NoRows | ExportError::NoColumns)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
