//! Route handlers.

use std::path::Path;
use std::time::Instant;

use askama::Template;
use axum::Json;
use axum::body::Body;
use axum::extract::{Query, Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use dg_core::Report;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use crate::access::resolve_within_roots;
use crate::error::ViewError;
use crate::state::{AppState, GridInfo};
use crate::view::{self, ViewKind};

const APP_JS: &str = include_str!("../assets/app.js");
const STYLE_CSS: &str = include_str!("../assets/style.css");

/// `?type=` on `/api/status`.
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    #[serde(rename = "type")]
    grid: Option<String>,
}

/// `?file=` (and `?download=`) on `/view` and `/file`.
#[derive(Debug, Default, Deserialize)]
pub struct FileQuery {
    file: Option<String>,
    download: Option<String>,
}

impl FileQuery {
    fn file(&self) -> Result<&str, ViewError> {
        self.file
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or(ViewError::MissingParameter("file"))
    }

    fn wants_download(&self) -> bool {
        self.download
            .as_deref()
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage<'a> {
    base_path: &'a str,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ViewError> {
    let page = IndexPage {
        base_path: state.base_path(),
    };
    Ok(Html(page.render()?))
}

pub async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], APP_JS)
}

pub async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn grids(State(state): State<AppState>) -> Json<Vec<GridInfo>> {
    Json(state.grids().collect())
}

pub async fn status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Report>, ViewError> {
    let name = query.grid.as_deref();
    let scanner = state
        .scanner(name)
        .ok_or_else(|| ViewError::UnknownGrid(name.unwrap_or_default().to_owned()))?
        .clone();

    debug!(grid = %scanner.grid().name, "scanning");
    let outcome = tokio::task::spawn_blocking(move || scanner.scan()).await??;
    Ok(Json(outcome.report))
}

pub async fn view(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Html<String>, ViewError> {
    let requested = query.file()?;
    let path = resolve_within_roots(requested, state.roots()).await?;
    let kind = ViewKind::for_path(&path)?;

    let raw_href = format!(
        "{}/file?file={}",
        state.base_path(),
        urlencoding::encode(requested)
    );
    let html = tokio::task::spawn_blocking(move || view::render(&path, kind, &raw_href)).await??;
    Ok(Html(html))
}

pub async fn file(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Response, ViewError> {
    let requested = query.file()?;
    let path = resolve_within_roots(requested, state.roots()).await?;

    let handle = tokio::fs::File::open(&path).await?;
    let length = handle.metadata().await?.len();
    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    let mut response = Body::from_stream(ReaderStream::new(handle)).into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    if query.wants_download() {
        if let Ok(value) = HeaderValue::from_str(&attachment(&path)) {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
    }
    Ok(response)
}

/// Logs one line per request.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let query = request.uri().query().unwrap_or_default().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        query = %query,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis(),
        "request"
    );
    response
}

/// Download name for spreadsheets: `<stem>_readonly<.ext>`.
fn readonly_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("download");
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_readonly.{ext}"),
        None => format!("{stem}_readonly"),
    }
}

/// `Content-Disposition` value with an ASCII fallback and an RFC 5987 name.
fn attachment(path: &Path) -> String {
    let name = readonly_name(path);
    let fallback: String = name
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(&name)
    )
}
