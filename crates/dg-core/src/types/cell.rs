//! Aggregation cells.
//!
//! A [`Cell`] collects every file that maps to one (period, category) pair.
//! The count is never stored separately: it is the length of the file list,
//! so the two cannot disagree.

use camino::{Utf8Path, Utf8PathBuf};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use smallvec::SmallVec;

use super::status::CellStatus;

/// One file reference inside a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellFile {
    /// Full path as supplied by the listing.
    pub path: Utf8PathBuf,

    /// Display badge extracted from the file name, if any.
    pub badge: Option<String>,
}

impl CellFile {
    /// Returns the lowercased extension with its leading dot, or an empty
    /// string when the path has none.
    #[must_use]
    pub fn extension(&self) -> String {
        dotted_extension(&self.path)
    }
}

/// All files sharing one (period, category) pair, in scan order.
///
/// Serializes as `{count, paths, exts}` plus `badge` when the cell holds a
/// single file with a badge.
///
/// # Examples
///
/// ```
/// use dg_core::{Cell, CellStatus};
///
/// let mut cell = Cell::default();
/// assert_eq!(cell.status(), CellStatus::Missing);
///
/// cell.push("/docs/202401_Invoice.pdf", None);
/// assert_eq!(cell.count(), 1);
/// assert_eq!(cell.status(), CellStatus::Complete);
/// assert_eq!(cell.single_path().map(|p| p.as_str()), Some("/docs/202401_Invoice.pdf"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Most cells hold zero or one file, so one slot is inline.
    files: SmallVec<[CellFile; 1]>,
}

impl Cell {
    /// Appends a contributing file.
    pub fn push(&mut self, path: impl Into<Utf8PathBuf>, badge: Option<String>) {
        self.files.push(CellFile {
            path: path.into(),
            badge,
        });
    }

    /// Number of contributing files.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file contributes to this cell.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Completeness state derived from the count.
    #[inline]
    #[must_use]
    pub fn status(&self) -> CellStatus {
        CellStatus::from_count(self.count())
    }

    /// Contributing files in scan order.
    #[inline]
    #[must_use]
    pub fn files(&self) -> &[CellFile] {
        &self.files
    }

    /// Contributing paths in scan order.
    pub fn paths(&self) -> impl Iterator<Item = &Utf8Path> {
        self.files.iter().map(|file| file.path.as_path())
    }

    /// The path of the only file, when the cell is complete.
    #[must_use]
    pub fn single_path(&self) -> Option<&Utf8Path> {
        match self.files.as_slice() {
            [only] => Some(&only.path),
            _ => None,
        }
    }

    /// The badge of the only file, when the cell is complete and has one.
    #[must_use]
    pub fn badge(&self) -> Option<&str> {
        match self.files.as_slice() {
            [only] => only.badge.as_deref(),
            _ => None,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let badge = self.badge();
        let len = if badge.is_some() { 4 } else { 3 };
        let mut state = serializer.serialize_struct("Cell", len)?;
        state.serialize_field("count", &self.count())?;
        let paths: Vec<&str> = self.files.iter().map(|f| f.path.as_str()).collect();
        state.serialize_field("paths", &paths)?;
        let exts: Vec<String> = self.files.iter().map(CellFile::extension).collect();
        state.serialize_field("exts", &exts)?;
        if let Some(badge) = badge {
            state.serialize_field("badge", badge)?;
        } else {
            state.skip_field("badge")?;
        }
        state.end()
    }
}

fn dotted_extension(path: &Utf8Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell() {
        let cell = Cell::default();
        assert_eq!(cell.count(), 0);
        assert!(cell.is_empty());
        assert_eq!(cell.status(), CellStatus::Missing);
        assert!(cell.single_path().is_none());
        assert!(cell.badge().is_none());
    }

    #[test]
    fn test_count_tracks_files() {
        let mut cell = Cell::default();
        cell.push("/d/202401_Invoice.pdf", None);
        cell.push("/d/202401_Invoice.csv", None);
        assert_eq!(cell.count(), 2);
        assert_eq!(cell.files().len(), cell.count());
        assert_eq!(cell.status(), CellStatus::Duplicate);
        assert!(cell.single_path().is_none());
        let paths: Vec<_> = cell.paths().map(Utf8Path::as_str).collect();
        assert_eq!(paths, vec!["/d/202401_Invoice.pdf", "/d/202401_Invoice.csv"]);
    }

    #[test]
    fn test_badge_only_for_single_file() {
        let mut cell = Cell::default();
        cell.push("/d/202401_Payroll 12-3.xlsx", Some("12-3".to_owned()));
        assert_eq!(cell.badge(), Some("12-3"));
        cell.push("/d/202401_Payroll 12-4.xlsx", Some("12-4".to_owned()));
        assert_eq!(cell.badge(), None);
    }

    #[test]
    fn test_extension_is_lowercased() {
        let file = CellFile {
            path: Utf8PathBuf::from("/d/202401_Scan.JPG"),
            badge: None,
        };
        assert_eq!(file.extension(), ".jpg");
        let bare = CellFile {
            path: Utf8PathBuf::from("/d/README"),
            badge: None,
        };
        assert_eq!(bare.extension(), "");
    }

    #[test]
    fn test_cell_json_shape() {
        let mut cell = Cell::default();
        cell.push("/d/202401_Invoice 3-1.PDF", Some("3-1".to_owned()));
        insta::assert_json_snapshot!(cell, @r###"
        {
          "count": 1,
          "paths": [
            "/d/202401_Invoice 3-1.PDF"
          ],
          "exts": [
            ".pdf"
          ],
          "badge": "3-1"
        }
        "###);
    }

    #[test]
    fn test_empty_cell_json() {
        let json = serde_json::to_value(Cell::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"count": 0, "paths": [], "exts": []})
        );
    }
}
