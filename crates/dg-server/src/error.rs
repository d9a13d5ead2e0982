//! Error types for the dg-server crate.
//!
//! Every failure a handler can hit is a [`ViewError`]. Its
//! [`IntoResponse`] impl picks the status code and writes the JSON body
//! `{"error": "<message>"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dg_scanner::ScanError;
use serde_json::json;
use tracing::{error, warn};

/// Body sent when a grid root cannot be listed.
pub const LISTING_UNAVAILABLE_MESSAGE: &str = "Failed to read folder";

/// Errors returned by the HTTP handlers.
///
/// # Examples
///
/// ```
/// use axum::http::StatusCode;
/// use dg_server::ViewError;
///
/// assert_eq!(ViewError::MissingParameter("file").status(), StatusCode::BAD_REQUEST);
/// assert_eq!(
///     ViewError::UnsupportedType(".docx".to_owned()).status(),
///     StatusCode::UNSUPPORTED_MEDIA_TYPE
/// );
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// A required query parameter is missing or empty.
    #[error("missing query parameter '{0}'")]
    MissingParameter(&'static str),

    /// The requested grid is not configured.
    #[error("unknown grid '{0}'")]
    UnknownGrid(String),

    /// The path resolves outside every configured root.
    #[error("access denied")]
    AccessDenied(String),

    /// The path does not exist or is not a regular file.
    #[error("file not found")]
    NotFound(String),

    /// The viewer has no renderer for this extension.
    #[error("unsupported file type '{0}'")]
    UnsupportedType(String),

    /// Reading the file failed.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The spreadsheet could not be opened or read.
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// The CSV file could not be parsed.
    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),

    /// A page template failed to render.
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),

    /// The grid root could not be listed.
    #[error("{LISTING_UNAVAILABLE_MESSAGE}")]
    Listing(#[from] ScanError),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ViewError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::UnknownGrid(_) => StatusCode::BAD_REQUEST,
            Self::AccessDenied(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Io(_)
            | Self::Spreadsheet(_)
            | Self::Csv(_)
            | Self::Render(_)
            | Self::Listing(_)
            | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::AccessDenied(path) => warn!(path = %path, "path outside configured roots"),
            Self::Listing(source) => error!(error = %source, "status scan failed"),
            _ if status.is_server_error() => error!(error = %self, "request failed"),
            _ => {}
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
