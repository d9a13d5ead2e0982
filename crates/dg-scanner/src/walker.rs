//! Recursive folder listing.
//!
//! This module provides [`FileWalker`], which uses the `ignore` crate to walk
//! a grid root and collect every regular file below it.
//!
//! # Features
//!
//! - No `.gitignore`, `.ignore`, or hidden-file filtering: every file in the
//!   document store counts
//! - Symbolic links are not followed
//! - Deterministic order (entries sorted by file name within each directory)
//! - Converts paths to UTF-8 [`Utf8PathBuf`](camino::Utf8PathBuf); a name that
//!   is not UTF-8 is kept as a lossy entry so it still shows up as unprocessed
//!
//! # Examples
//!
//! ```no_run
//! use dg_scanner::FileWalker;
//! use camino::Utf8Path;
//!
//! let walker = FileWalker::new(Utf8Path::new("/srv/docs"))?;
//! for entry in walker.collect_entries()? {
//!     println!("Found: {}", entry.path());
//! }
//! # Ok::<(), dg_scanner::ScanError>(())
//! ```

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use dg_core::FileEntry;
use ignore::WalkBuilder;
use tracing::warn;

use crate::error::ScanError;

/// A file walker that lists every regular file under a root directory.
#[derive(Debug)]
pub struct FileWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Whether to follow symbolic links.
    follow_links: bool,
}

impl FileWalker {
    /// Creates a new file walker for the given root directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ListingUnavailable`] if the root doesn't exist,
    /// isn't a directory, or can't be read.
    pub fn new(root: &Utf8Path) -> Result<Self, ScanError> {
        let metadata =
            std::fs::metadata(root).map_err(|e| ScanError::listing_unavailable(root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::listing_unavailable(
                root,
                io::Error::new(io::ErrorKind::NotADirectory, "root is not a directory"),
            ));
        }
        std::fs::read_dir(root).map_err(|e| ScanError::listing_unavailable(root, e))?;

        Ok(Self {
            root: root.to_owned(),
            follow_links: false,
        })
    }

    /// Configures whether to follow symbolic links.
    ///
    /// By default, symbolic links are not followed.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Collects every regular file in the directory tree.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] if directory traversal fails below the root.
    /// A path that is not valid UTF-8 is not an error: it is listed as a
    /// [`FileEntry::lossy`] entry, which never classifies.
    pub fn collect_entries(&self) -> Result<Vec<FileEntry>, ScanError> {
        let mut entries = Vec::new();

        for result in self.build_walker() {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            match Utf8Path::from_path(path) {
                Some(utf8_path) => entries.push(FileEntry::new(utf8_path)),
                None => {
                    let lossy = path.to_string_lossy().into_owned();
                    warn!(path = %lossy, "file name is not valid UTF-8");
                    entries.push(FileEntry::lossy(lossy));
                }
            }
        }

        Ok(entries)
    }

    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            // The root is a document store, not a source tree
            .standard_filters(false)
            .follow_links(self.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b))
            .threads(1)
            .require_git(false)
            .build()
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}
