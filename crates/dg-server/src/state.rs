//! Shared server state.

use std::sync::Arc;

use camino::Utf8Path;
use dg_core::Config;
use dg_scanner::{ScanError, Scanner};
use serde::Serialize;

/// State shared by every handler.
///
/// Cheap to clone; the config and scanners are built once at startup and
/// never change.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    config: Config,
    scanners: Vec<Scanner>,
    base_path: String,
}

/// A grid as listed by `/api/grids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridInfo {
    /// Value for `?type=`.
    pub name: String,
    /// Tab label.
    pub label: String,
}

impl AppState {
    /// Builds the state, with one scanner per configured grid.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] if a grid is invalid.
    pub fn new(config: Config) -> Result<Self, ScanError> {
        let scanners = config
            .grids
            .iter()
            .cloned()
            .map(Scanner::new)
            .collect::<Result<Vec<_>, _>>()?;
        let base_path = config.server.normalized_base_path().unwrap_or_default();

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                scanners,
                base_path,
            }),
        })
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Route prefix (`""` or `/prefix`).
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.inner.base_path
    }

    /// The scanner for grid `name`, or the first grid when `name` is absent
    /// or empty.
    #[must_use]
    pub fn scanner(&self, name: Option<&str>) -> Option<&Scanner> {
        match name.filter(|n| !n.is_empty()) {
            Some(name) => self.inner.scanners.iter().find(|s| s.grid().name == name),
            None => self.inner.scanners.first(),
        }
    }

    /// Configured grids in order.
    pub fn grids(&self) -> impl Iterator<Item = GridInfo> {
        self.inner.scanners.iter().map(|s| GridInfo {
            name: s.grid().name.clone(),
            label: s.grid().label.clone(),
        })
    }

    /// Every configured grid root.
    pub fn roots(&self) -> impl Iterator<Item = &Utf8Path> {
        self.inner.config.roots()
    }
}
