//! The report returned by a scan.
//!
//! [`Report`] is the only value that crosses the system boundary. It
//! serializes to:
//!
//! ```text
//! { months: [string], columns: [{key,label}],
//!   grid: [{month, <categoryKey>: {count, paths, exts}}],
//!   unprocessedFiles: [string] }
//! ```
//!
//! `months` is ascending and `grid` rows line up with it one to one. Newest
//! first ordering is a presentation concern and is left to the viewer.

use camino::{Utf8Path, Utf8PathBuf};
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use super::cell::Cell;
use super::column::{Column, RESERVED_ROW_KEY};
use super::period::Period;

/// One grid row: a period and one cell per column, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// The row period.
    pub month: Period,

    /// Cells aligned with [`Report::columns`].
    pub cells: Vec<Cell>,
}

/// The month × category completeness grid.
///
/// # Examples
///
/// ```
/// use dg_core::{Column, Report};
///
/// let report = Report::empty(vec![Column::new("Invoice", "Invoices")]);
/// assert!(report.months.is_empty());
/// assert!(report.grid.is_empty());
///
/// let json = serde_json::to_value(&report).unwrap();
/// assert_eq!(json["unprocessedFiles"], serde_json::json!([]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Gap-free ascending period axis.
    pub months: Vec<Period>,

    /// Grid columns in display order.
    pub columns: Vec<Column>,

    /// One row per entry in `months`.
    pub grid: Vec<GridRow>,

    /// Paths of files that did not match the naming convention, in scan order.
    pub unprocessed_files: Vec<Utf8PathBuf>,
}

impl Report {
    /// Assembles a report from already computed parts.
    #[must_use]
    pub fn new(
        months: Vec<Period>,
        columns: Vec<Column>,
        grid: Vec<GridRow>,
        unprocessed_files: Vec<Utf8PathBuf>,
    ) -> Self {
        Self {
            months,
            columns,
            grid,
            unprocessed_files,
        }
    }

    /// A report with no rows and no unprocessed files.
    #[must_use]
    pub fn empty(columns: Vec<Column>) -> Self {
        Self::new(Vec::new(), columns, Vec::new(), Vec::new())
    }

    /// Returns the cell for a period and column key.
    #[must_use]
    pub fn cell(&self, month: Period, key: &str) -> Option<&Cell> {
        let column = self.columns.iter().position(|c| c.key == key)?;
        let row = self.grid.iter().find(|row| row.month == month)?;
        row.cells.get(column)
    }

    /// Returns one column's cells from oldest to newest.
    pub fn column_cells<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Cell> + use<'a> {
        let column = self.columns.iter().position(|c| c.key == key);
        self.grid
            .iter()
            .filter_map(move |row| column.and_then(|idx| row.cells.get(idx)))
    }

    /// Iterates `(period, column, cell)` over the whole grid, oldest first.
    pub fn cells(&self) -> impl Iterator<Item = (Period, &Column, &Cell)> {
        self.grid.iter().flat_map(move |row| {
            self.columns
                .iter()
                .zip(&row.cells)
                .map(move |(column, cell)| (row.month, column, cell))
        })
    }

    /// Iterates over unprocessed file paths.
    pub fn unprocessed(&self) -> impl Iterator<Item = &Utf8Path> {
        self.unprocessed_files.iter().map(Utf8PathBuf::as_path)
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Report", 4)?;
        state.serialize_field("months", &self.months)?;
        state.serialize_field("columns", &self.columns)?;
        state.serialize_field(
            "grid",
            &KeyedRows {
                columns: &self.columns,
                grid: &self.grid,
            },
        )?;
        state.serialize_field("unprocessedFiles", &self.unprocessed_files)?;
        state.end()
    }
}

/// Grid rows keyed by column key, each preceded by the row period.
struct KeyedRows<'a> {
    columns: &'a [Column],
    grid: &'a [GridRow],
}

impl Serialize for KeyedRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.grid.iter().map(|row| KeyedRow {
            columns: self.columns,
            row,
        }))
    }
}

struct KeyedRow<'a> {
    columns: &'a [Column],
    row: &'a GridRow,
}

impl Serialize for KeyedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + 1))?;
        map.serialize_entry(RESERVED_ROW_KEY, &self.row.month)?;
        for (column, cell) in self.columns.iter().zip(&self.row.cells) {
            map.serialize_entry(&column.key, cell)?;
        }
        map.end()
    }
}
