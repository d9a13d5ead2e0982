//! HTTP status grid, file viewer, and static UI for docgrid.
//!
//! # Routes
//!
//! | Route | Response |
//! |---|---|
//! | `GET /` | Single-page UI (`/app.js`, `/style.css`) |
//! | `GET /api/grids` | `[{name, label}]` of configured grids |
//! | `GET /api/status?type=<grid>` | The grid's report as JSON |
//! | `GET /view?file=<path>` | HTML rendering of one contained file |
//! | `GET /file?file=<path>[&download=1]` | Raw bytes of one contained file |
//! | `GET /health` | `{"status": "ok"}` |
//!
//! When `server.base_path` is set every route is mounted below it.
//!
//! Each status request takes a fresh listing; nothing is cached between
//! requests. File routes only serve paths whose canonical form lies inside
//! a configured grid root.
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use dg_core::Config;
//! use dg_server::{AppState, build_router, shutdown_signal};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(Utf8Path::new("config.json"))?;
//! let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
//! let app = build_router(AppState::new(config)?);
//! axum::serve(listener, app)
//!     .with_graceful_shutdown(shutdown_signal())
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod access;
mod error;
mod routes;
mod state;
mod view;

pub use access::resolve_within_roots;
pub use error::{LISTING_UNAVAILABLE_MESSAGE, ViewError};
pub use state::{AppState, GridInfo};
pub use view::{Table, ViewKind};

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tracing::warn;

/// Builds the application router for `state`.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(routes::index))
        .route("/app.js", get(routes::app_js))
        .route("/style.css", get(routes::style_css))
        .route("/api/grids", get(routes::grids))
        .route("/api/status", get(routes::status))
        .route("/view", get(routes::view))
        .route("/file", get(routes::file))
        .route("/health", get(routes::health))
        .with_state(state.clone());

    let app = if state.base_path().is_empty() {
        routes
    } else {
        Router::new().nest(state.base_path(), routes)
    };
    app.layer(middleware::from_fn(routes::log_request))
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                return;
            }
            Err(e) => warn!(error = %e, "cannot listen for SIGTERM"),
        }
    }
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
