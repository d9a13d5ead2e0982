//! Folder listing, period axis, and grid aggregation for docgrid.
//!
//! This crate turns a configured grid root into a [`Report`]: it lists the
//! folder, classifies every file name with `dg-classify`, builds the
//! gap-free period axis, and aggregates files into the period × category
//! matrix.
//!
//! # Overview
//!
//! The main entry point is [`Scanner`], which combines:
//!
//! - [`FileWalker`]: recursive listing of the grid root
//! - [`ReportBuilder`]: the pure classify → axis → aggregate → assemble pass
//! - [`ReportSummary`]: cell state counts for logs and the CLI
//!
//! The pure pass is also exposed on its own ([`build_report`], [`build_axis`],
//! [`aggregate`]) for callers that already hold a listing.
//!
//! # Example
//!
//! ```no_run
//! use dg_core::GridConfig;
//! use dg_scanner::Scanner;
//!
//! let scanner = Scanner::new(GridConfig::new("main", "/srv/docs"))?;
//! let outcome = scanner.scan()?;
//! println!(
//!     "{} months, {} missing cells",
//!     outcome.summary.months, outcome.summary.missing
//! );
//! # Ok::<(), dg_scanner::ScanError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! Scanner (main entry point)
//!     │
//!     ├── FileWalker (listing)
//!     │       │
//!     │       └── WalkBuilder (ignore crate, no filters)
//!     │
//!     └── ReportBuilder (pure)
//!             │
//!             ├── Classifier (dg-classify)
//!             ├── build_axis
//!             └── aggregate
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod aggregate;
mod axis;
mod error;
mod export;
mod report;
mod stats;
mod walker;

pub use aggregate::{aggregate, discover_columns};
pub use axis::build_axis;
pub use error::ScanError;
pub use export::{PATH_SEPARATOR, write_csv};
pub use report::{ReportBuilder, build_report};
pub use stats::ReportSummary;
pub use walker::FileWalker;

use std::time::{Duration, Instant};

use dg_core::{GridConfig, Report};
use tracing::{info, warn};

/// Result of a scan operation.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// The report for the grid.
    pub report: Report,
    /// Cell state counts for the report.
    pub summary: ReportSummary,
    /// Wall time spent listing and building.
    pub elapsed: Duration,
}

/// Scans one grid root and builds its report.
///
/// Holds no state between scans: every call takes a fresh listing and
/// returns a fresh report, so clones can run concurrently.
#[derive(Debug, Clone)]
pub struct Scanner {
    grid: GridConfig,
    builder: ReportBuilder,
}

impl Scanner {
    /// Creates a scanner for `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the grid configuration is invalid and
    /// [`ScanError::Classify`] if the classifier cannot be built.
    pub fn new(grid: GridConfig) -> Result<Self, ScanError> {
        grid.validate().map_err(|e| ScanError::config(e.to_string()))?;
        let builder = ReportBuilder::new(&grid)?;
        Ok(Self { grid, builder })
    }

    /// The grid this scanner reports on.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Lists the grid root and builds its report.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ListingUnavailable`] if the root cannot be read,
    /// or [`ScanError::Walk`] if traversal fails below it. An empty folder is
    /// not an error.
    pub fn scan(&self) -> Result<ScanOutcome, ScanError> {
        let started = Instant::now();

        let listing = FileWalker::new(&self.grid.root)
            .and_then(|walker| walker.collect_entries())
            .inspect_err(|e| {
                warn!(grid = %self.grid.name, root = %self.grid.root, error = %e, "listing failed");
            })?;

        let report = self.builder.build(&listing);
        let summary = ReportSummary::of(&report, listing.len());
        let elapsed = started.elapsed();

        info!(
            grid = %self.grid.name,
            root = %self.grid.root,
            files = listing.len(),
            months = summary.months,
            columns = summary.columns,
            missing = summary.missing,
            duplicate = summary.duplicate,
            unclassified = summary.unclassified,
            elapsed_ms = elapsed.as_millis(),
            "scan complete"
        );

        Ok(ScanOutcome {
            report,
            summary,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use dg_core::{Cell, Column};
    use std::fs;
    use tempfile::TempDir;

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_scan_folder() {
        let dir = TempDir::new().unwrap();
        let root = utf8_root(&dir);
        fs::create_dir_all(root.join("2024")).unwrap();
        fs::write(root.join("2024/202401_Invoice.pdf"), "a").unwrap();
        fs::write(root.join("2024/202403_Invoice.pdf"), "b").unwrap();
        fs::write(root.join("notes.txt"), "c").unwrap();

        let scanner = Scanner::new(GridConfig::new("main", root.clone())).unwrap();
        let outcome = scanner.scan().unwrap();

        let counts: Vec<usize> = outcome.report.column_cells("Invoice").map(Cell::count).collect();
        assert_eq!(counts, [1, 0, 1]);
        assert_eq!(outcome.report.unprocessed_files, [root.join("notes.txt")]);
        assert_eq!(outcome.summary.classified_files, 2);
    }

    #[test]
    fn test_scan_empty_folder() {
        let dir = TempDir::new().unwrap();
        let scanner = Scanner::new(GridConfig::new("main", utf8_root(&dir))).unwrap();
        let outcome = scanner.scan().unwrap();
        assert_eq!(outcome.report, Report::empty(Vec::new()));
    }

    #[test]
    fn test_scan_missing_folder() {
        let dir = TempDir::new().unwrap();
        let root = utf8_root(&dir).join("gone");
        let scanner = Scanner::new(GridConfig::new("main", root)).unwrap();
        let err = scanner.scan().unwrap_err();
        assert!(err.is_listing_unavailable());
    }

    #[test]
    fn test_scanner_rejects_invalid_grid() {
        let grid = GridConfig::new("main", "/d").with_dictionary(vec![Column::new("month", "M")]);
        let err = Scanner::new(grid).unwrap_err();
        assert!(matches!(err, ScanError::Config(_)));
    }

    #[test]
    fn test_repeated_scans_agree() {
        let dir = TempDir::new().unwrap();
        let root = utf8_root(&dir);
        for name in ["202401_Bank.pdf", "202401_Bank.csv", "202405_VAT.xlsx", "x.bin"] {
            fs::write(root.join(name), "").unwrap();
        }

        let scanner = Scanner::new(GridConfig::new("main", root)).unwrap();
        let first = scanner.scan().unwrap();
        let second = scanner.clone().scan().unwrap();
        assert_eq!(first.report, second.report);
        assert_eq!(first.summary, second.summary);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_is_unprocessed() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let root = utf8_root(&dir);
        fs::write(root.join("202401_Invoice.pdf"), "a").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"202401_Inv\xffoice.pdf")), "b").unwrap();

        let scanner = Scanner::new(GridConfig::new("main", root.clone())).unwrap();
        let outcome = scanner.scan().unwrap();

        let counts: Vec<usize> = outcome.report.column_cells("Invoice").map(Cell::count).collect();
        assert_eq!(counts, [1]);
        assert_eq!(
            outcome.report.unprocessed_files,
            [root.join("202401_Inv\u{FFFD}oice.pdf")]
        );
    }
}
