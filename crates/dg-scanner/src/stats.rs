//! Report statistics.
//!
//! This module provides [`ReportSummary`], a point-in-time count of cell
//! states for one report. It is what `docgrid scan` prints and what the
//! server logs after each status request.
//!
//! # Examples
//!
//! ```
//! use dg_core::{FileEntry, GridConfig};
//! use dg_scanner::{ReportSummary, build_report};
//!
//! let listing = [
//!     FileEntry::new("/docs/202401_Invoice.pdf"),
//!     FileEntry::new("/docs/202403_Invoice.pdf"),
//! ];
//! let report = build_report(&listing, &GridConfig::new("main", "/docs"))?;
//!
//! let summary = ReportSummary::of(&report, listing.len());
//! assert_eq!(summary.cells, 3);
//! assert_eq!(summary.missing, 1);
//! # Ok::<(), dg_classify::ClassifyError>(())
//! ```

use dg_core::{CellStatus, Report};
use serde::{Deserialize, Serialize};

/// Cell and file counts for one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of rows on the period axis.
    pub months: usize,
    /// Number of columns.
    pub columns: usize,
    /// Number of cells (`months * columns`).
    pub cells: usize,
    /// Cells with no file.
    pub missing: usize,
    /// Cells with exactly one file.
    pub complete: usize,
    /// Cells with more than one file.
    pub duplicate: usize,
    /// Files that did not match the naming convention.
    pub unclassified: usize,
    /// Files that matched the naming convention.
    pub classified_files: usize,
}

impl ReportSummary {
    /// Summarizes `report`, built from a listing of `listed` files.
    #[must_use]
    pub fn of(report: &Report, listed: usize) -> Self {
        let mut summary = Self {
            months: report.months.len(),
            columns: report.columns.len(),
            unclassified: report.unprocessed_files.len(),
            classified_files: listed.saturating_sub(report.unprocessed_files.len()),
            ..Self::default()
        };

        for (_, _, cell) in report.cells() {
            summary.cells += 1;
            match cell.status() {
                CellStatus::Missing => summary.missing += 1,
                CellStatus::Complete => summary.complete += 1,
                CellStatus::Duplicate => summary.duplicate += 1,
            }
        }

        summary
    }

    /// Returns the share of complete cells as a percentage.
    ///
    /// Returns 100.0 if the report has no cells.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable for statistics display
    pub fn completeness_percent(&self) -> f64 {
        if self.cells == 0 {
            return 100.0;
        }

        (self.complete as f64 / self.cells as f64) * 100.0
    }

    /// Number of cells that need a look (missing or duplicate).
    #[inline]
    #[must_use]
    pub const fn needs_attention(&self) -> usize {
        self.missing + self.duplicate
    }
}
