//! Report assembly.
//!
//! [`ReportBuilder`] runs the pure part of the pipeline over a listing:
//! classify every entry, derive the columns and the period axis, aggregate,
//! and assemble the [`Report`]. It performs no I/O, holds no state between
//! calls, and returns structurally identical reports for identical listings.

use camino::Utf8PathBuf;
use dg_classify::{Classification, ClassifyError, Classifier};
use dg_core::{CategoryPolicy, ClassifiedFile, FileEntry, GridConfig, Report};
use tracing::{debug, trace};

use crate::aggregate::{aggregate, discover_columns};
use crate::axis::build_axis;

/// Builds reports for one grid.
///
/// # Examples
///
/// ```
/// use dg_core::{FileEntry, GridConfig};
/// use dg_scanner::ReportBuilder;
///
/// let builder = ReportBuilder::new(&GridConfig::new("main", "/docs"))?;
/// let listing = [
///     FileEntry::new("/docs/202401_Invoice.pdf"),
///     FileEntry::new("/docs/202403_Invoice.pdf"),
///     FileEntry::new("/docs/notes.txt"),
/// ];
///
/// let report = builder.build(&listing);
/// assert_eq!(report.months.len(), 3);
/// let counts: Vec<usize> = report.column_cells("Invoice").map(|c| c.count()).collect();
/// assert_eq!(counts, [1, 0, 1]);
/// assert_eq!(report.unprocessed_files.len(), 1);
/// # Ok::<(), dg_classify::ClassifyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    classifier: Classifier,
}

impl ReportBuilder {
    /// Creates a builder for `grid`.
    pub fn new(grid: &GridConfig) -> Result<Self, ClassifyError> {
        Ok(Self {
            classifier: Classifier::new(grid)?,
        })
    }

    /// The classifier used for every listing entry.
    #[inline]
    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Builds the report for `listing`, which must be in scan order.
    #[must_use]
    pub fn build(&self, listing: &[FileEntry]) -> Report {
        let mut classified: Vec<ClassifiedFile<'_>> = Vec::with_capacity(listing.len());
        let mut unprocessed: Vec<Utf8PathBuf> = Vec::new();

        for entry in listing {
            match self.classifier.classify(entry) {
                Classification::Classified(file) => classified.push(file),
                Classification::Unclassified { entry, reason } => {
                    trace!(path = %entry.path(), reason = reason.describe(), "unclassified");
                    unprocessed.push(entry.path().to_owned());
                }
            }
        }

        let columns = match self.classifier.policy() {
            CategoryPolicy::Dynamic => discover_columns(&classified),
            CategoryPolicy::Dictionary => self.classifier.columns().to_vec(),
        };
        let months = build_axis(classified.iter().map(|file| file.period));
        let grid = aggregate(&months, &columns, &classified, &self.classifier);

        debug!(
            listed = listing.len(),
            classified = classified.len(),
            unprocessed = unprocessed.len(),
            months = months.len(),
            columns = columns.len(),
            "report built"
        );

        Report::new(months, columns, grid, unprocessed)
    }
}

/// Builds the report for `listing` under `grid` in one call.
pub fn build_report(listing: &[FileEntry], grid: &GridConfig) -> Result<Report, ClassifyError> {
    Ok(ReportBuilder::new(grid)?.build(listing))
}
