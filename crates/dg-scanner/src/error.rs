//! Error types for the dg-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! while obtaining a folder listing. Building the report itself never fails.

use camino::{Utf8Path, Utf8PathBuf};
use dg_classify::ClassifyError;

/// Errors that can occur during scanning operations.
///
/// An empty folder is not an error: it yields an empty report. Only failing to
/// obtain the listing at all is.
///
/// # Examples
///
/// ```
/// use dg_scanner::ScanError;
///
/// fn handle_error(err: ScanError) {
///     match err {
///         ScanError::ListingUnavailable { root, .. } => eprintln!("cannot read {root}"),
///         ScanError::Walk(e) => eprintln!("Walk error: {e}"),
///         ScanError::Config(msg) => eprintln!("Config error: {msg}"),
///         ScanError::Classify(e) => eprintln!("Classifier error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The grid root could not be listed (missing, not a directory, or
    /// unreadable).
    #[error("listing unavailable for {root}: {source}")]
    ListingUnavailable {
        /// The configured root.
        root: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed while walking below the root.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Invalid scanner configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The classifier could not be built.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

impl ScanError {
    /// Creates a new [`ScanError::ListingUnavailable`] error.
    #[inline]
    pub fn listing_unavailable(root: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::ListingUnavailable {
            root: root.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if the listing could not be obtained at all.
    #[inline]
    #[must_use]
    pub const fn is_listing_unavailable(&self) -> bool {
        matches!(self, Self::ListingUnavailable { .. } | Self::Walk(_))
    }

    /// Returns the root associated with this error, if any.
    #[must_use]
    pub fn root(&self) -> Option<&Utf8Path> {
        match self {
            Self::ListingUnavailable { root, .. } => Some(root),
            Self::Walk(_) | Self::Config(_) | Self::Classify(_) => None,
        }
    }
}
