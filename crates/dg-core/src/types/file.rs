//! File listing entries and their classification results.
//!
//! A [`FileEntry`] is what the listing collaborator hands to the pipeline. A
//! [`ClassifiedFile`] borrows the entry it was derived from, so a report build
//! never copies or owns the listing until it emits paths into cells.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use super::period::Period;

/// One file from a folder listing.
///
/// # Examples
///
/// ```
/// use dg_core::FileEntry;
///
/// let entry = FileEntry::new("/srv/docs/2024/202401_Invoice.pdf");
/// assert_eq!(entry.file_name(), "202401_Invoice.pdf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntry {
    path: Utf8PathBuf,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    lossy: bool,
}

impl FileEntry {
    /// Creates an entry for `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            lossy: false,
        }
    }

    /// Creates an entry for a path that is not valid UTF-8.
    ///
    /// The stored path is the lossy rendering (invalid bytes become
    /// `U+FFFD`). Such an entry is listed but never classified, since its
    /// name is not the real one on disk.
    ///
    /// # Examples
    ///
    /// ```
    /// use dg_core::FileEntry;
    ///
    /// let entry = FileEntry::lossy("/srv/docs/202401_Inv\u{FFFD}oice.pdf");
    /// assert!(entry.is_lossy());
    /// assert!(!FileEntry::new("/srv/docs/202401_Invoice.pdf").is_lossy());
    /// ```
    #[must_use]
    pub fn lossy(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            lossy: true,
        }
    }

    /// Returns `true` if the path was not valid UTF-8 on disk.
    #[inline]
    #[must_use]
    pub const fn is_lossy(&self) -> bool {
        self.lossy
    }

    /// Returns the full path as supplied by the listing.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the base name, or the whole path when it has no file name
    /// component.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.file_name().unwrap_or(self.path.as_str())
    }
}

impl From<Utf8PathBuf> for FileEntry {
    #[inline]
    fn from(path: Utf8PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for FileEntry {
    #[inline]
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// A file whose name matched the naming convention.
///
/// Created once per matching [`FileEntry`] and never mutated.
///
/// # Examples
///
/// ```
/// use dg_core::{ClassifiedFile, FileEntry, Period};
///
/// let entry = FileEntry::new("/srv/docs/202401_Invoice.pdf");
/// let file = ClassifiedFile {
///     period: Period::new(2024, 1).unwrap(),
///     category: "Invoice".to_owned(),
///     extension: ".pdf".to_owned(),
///     badge: None,
///     source: &entry,
/// };
/// assert_eq!(file.file_name(), "202401_Invoice.pdf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile<'a> {
    /// Reporting period taken from the first six digits.
    pub period: Period,

    /// Category segment between the period and the extension.
    pub category: String,

    /// Lowercased extension including the leading dot.
    pub extension: String,

    /// Last `digits-digits` pair after the name's last `_`, for display.
    pub badge: Option<String>,

    /// The listing entry this file was derived from.
    pub source: &'a FileEntry,
}

impl ClassifiedFile<'_> {
    /// Returns the base name of the source entry.
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.source.file_name()
    }

    /// Returns the full path of the source entry.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.source.path()
    }
}
