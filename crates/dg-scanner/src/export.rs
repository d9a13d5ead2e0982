//! CSV export.
//!
//! One record per period × column, oldest period first, with the header
//! `month,category,count,paths`. Paths within a cell are joined with `;`.

use std::io;

use dg_core::Report;

/// Separator between paths inside the `paths` field.
pub const PATH_SEPARATOR: &str = ";";

/// Writes `report` as CSV to `writer`.
///
/// # Examples
///
/// ```
/// use dg_core::{FileEntry, GridConfig};
/// use dg_scanner::{build_report, write_csv};
///
/// let listing = [FileEntry::new("/docs/202401_Invoice.pdf")];
/// let report = build_report(&listing, &GridConfig::new("main", "/docs"))?;
///
/// let mut out = Vec::new();
/// write_csv(&report, &mut out)?;
/// assert_eq!(
///     String::from_utf8(out)?,
///     "month,category,count,paths\n202401,Invoice,1,/docs/202401_Invoice.pdf\n"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_csv<W: io::Write>(report: &Report, writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["month", "category", "count", "paths"])?;

    for (month, column, cell) in report.cells() {
        let paths: Vec<&str> = cell.paths().map(camino::Utf8Path::as_str).collect();
        csv.write_record([
            month.to_string(),
            column.key.clone(),
            cell.count().to_string(),
            paths.join(PATH_SEPARATOR),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
