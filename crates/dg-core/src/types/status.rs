//! Cell completeness states.
//!
//! This module provides the [`CellStatus`] enum, the three-way reading of a
//! cell's file count.

use serde::{Deserialize, Serialize};

/// The completeness state of one (period, category) cell.
///
/// # Examples
///
/// ```
/// use dg_core::CellStatus;
///
/// assert_eq!(CellStatus::from_count(0), CellStatus::Missing);
/// assert_eq!(CellStatus::from_count(1), CellStatus::Complete);
/// assert_eq!(CellStatus::from_count(3), CellStatus::Duplicate);
/// assert!(CellStatus::Duplicate.needs_attention());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    /// No file covers the cell: the expected document is absent.
    Missing,

    /// Exactly one file covers the cell.
    Complete,

    /// More than one file covers the cell.
    ///
    /// Either a genuine duplicate or an ambiguous name; it is surfaced rather
    /// than collapsed.
    Duplicate,
}

impl CellStatus {
    /// Maps a file count to its status.
    #[inline]
    #[must_use]
    pub const fn from_count(count: usize) -> Self {
        match count {
            0 => Self::Missing,
            1 => Self::Complete,
            _ => Self::Duplicate,
        }
    }

    /// Returns `true` unless the cell is complete.
    #[inline]
    #[must_use]
    pub const fn needs_attention(self) -> bool {
        !matches!(self, Self::Complete)
    }

    /// Returns a human-readable label for this status.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missing => "Missing",
            Self::Complete => "Complete",
            Self::Duplicate => "Duplicate",
        }
    }

    /// Returns the glyph used in grid output.
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Missing => "❌",
            Self::Complete => "✔️",
            Self::Duplicate => "⚠️",
        }
    }

    /// Returns the CSS class suffix used by the web UI (`cell-<class>`).
    #[inline]
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Missing => "fail",
            Self::Complete => "ok",
            Self::Duplicate => "warn",
        }
    }
}
