//! The file name classifier.
//!
//! [`Classifier::classify`] is total: every [`FileEntry`] comes back as
//! exactly one of [`Classification::Classified`] or
//! [`Classification::Unclassified`]. Nothing here touches the filesystem.

use camino::Utf8Path;
use dg_core::{
    CategoryPolicy, ClassifiedFile, Column, FileEntry, FxHashSet, GridConfig, Period,
    RESERVED_ROW_KEY,
};
use regex::Regex;

use crate::badge::BadgeExtractor;
use crate::error::ClassifyError;
use crate::patterns;

/// Why a file was left out of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum UnclassifiedReason {
    /// The name does not follow the naming convention.
    NamePattern,

    /// The extension is missing or not in the allowed set.
    Extension,

    /// The category segment collides with the reserved row key.
    ReservedCategory,

    /// Dictionary policy only: no configured column key occurs in the name.
    NoMatchingColumn,

    /// The name on disk is not valid UTF-8; only a lossy rendering is known.
    NonUtf8Name,
}

impl UnclassifiedReason {
    /// Returns a short description for logs.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::NamePattern => "name does not match the naming convention",
            Self::Extension => "extension not allowed",
            Self::ReservedCategory => "category name is reserved",
            Self::NoMatchingColumn => "no configured category in name",
            Self::NonUtf8Name => "name is not valid UTF-8",
        }
    }
}

/// Outcome of classifying one listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'a> {
    /// The name matched; the file belongs in the grid.
    Classified(ClassifiedFile<'a>),

    /// The name did not match; the file is reported separately.
    Unclassified {
        /// The entry that failed.
        entry: &'a FileEntry,
        /// The first rule it failed.
        reason: UnclassifiedReason,
    },
}

impl<'a> Classification<'a> {
    /// Returns the classified file, if any.
    #[must_use]
    pub fn classified(self) -> Option<ClassifiedFile<'a>> {
        match self {
            Self::Classified(file) => Some(file),
            Self::Unclassified { .. } => None,
        }
    }

    /// Returns `true` for [`Classification::Classified`].
    #[inline]
    #[must_use]
    pub const fn is_classified(&self) -> bool {
        matches!(self, Self::Classified(_))
    }
}

/// Classifies file names for one grid.
///
/// Built once per report from a [`GridConfig`]; holds the policy, the
/// normalized allowed extensions, and references to the cached patterns.
///
/// # Examples
///
/// ```
/// use dg_classify::{Classification, Classifier};
/// use dg_core::{FileEntry, GridConfig};
///
/// let classifier = Classifier::new(&GridConfig::new("main", "/docs"))?;
///
/// let entry = FileEntry::new("/docs/202401_Invoice.pdf");
/// let Classification::Classified(file) = classifier.classify(&entry) else {
///     panic!("expected a classified file");
/// };
/// assert_eq!(file.period.to_string(), "202401");
/// assert_eq!(file.category, "Invoice");
/// assert_eq!(file.extension, ".pdf");
///
/// let notes = FileEntry::new("/docs/notes.txt");
/// assert!(!classifier.classify(&notes).is_classified());
/// # Ok::<(), dg_classify::ClassifyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    policy: CategoryPolicy,
    columns: Vec<Column>,
    allowed_extensions: FxHashSet<String>,
    strict: &'static Regex,
    lenient: &'static Regex,
    badges: BadgeExtractor,
}

impl Classifier {
    /// Creates a classifier for `grid`.
    pub fn new(grid: &GridConfig) -> Result<Self, ClassifyError> {
        let allowed_extensions = grid
            .allowed_extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        Ok(Self {
            policy: grid.policy,
            columns: grid.columns.clone(),
            allowed_extensions,
            strict: patterns::strict_name()?,
            lenient: patterns::lenient_prefix()?,
            badges: BadgeExtractor::new()?,
        })
    }

    /// The policy this classifier applies.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> CategoryPolicy {
        self.policy
    }

    /// The configured dictionary columns (empty under the dynamic policy).
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Classifies one listing entry by its base name.
    #[must_use]
    pub fn classify<'a>(&self, entry: &'a FileEntry) -> Classification<'a> {
        if entry.is_lossy() {
            return Classification::Unclassified {
                entry,
                reason: UnclassifiedReason::NonUtf8Name,
            };
        }
        let result = match self.policy {
            CategoryPolicy::Dynamic => self.classify_strict(entry),
            CategoryPolicy::Dictionary => self.classify_lenient(entry),
        };
        match result {
            Ok(file) => Classification::Classified(file),
            Err(reason) => Classification::Unclassified { entry, reason },
        }
    }

    /// Returns `true` if `file` belongs in `column` under this policy.
    ///
    /// Dynamic: the category segment equals the key. Dictionary: the key
    /// occurs anywhere in the base name, so one file may match several
    /// columns.
    #[must_use]
    pub fn matches(&self, file: &ClassifiedFile<'_>, column: &Column) -> bool {
        match self.policy {
            CategoryPolicy::Dynamic => file.category == column.key,
            CategoryPolicy::Dictionary => file.file_name().contains(column.key.as_str()),
        }
    }

    /// `YYYYMM_<category>.<ext>`, exact category.
    fn classify_strict<'a>(
        &self,
        entry: &'a FileEntry,
    ) -> Result<ClassifiedFile<'a>, UnclassifiedReason> {
        let name = entry.file_name();
        let caps = self
            .strict
            .captures(name)
            .ok_or(UnclassifiedReason::NamePattern)?;
        let period =
            Period::from_token(&caps[1]).map_err(|_| UnclassifiedReason::NamePattern)?;

        let extension = caps[3].to_ascii_lowercase();
        if !self.extension_allowed(&extension) {
            return Err(UnclassifiedReason::Extension);
        }

        let category = &caps[2];
        if category == RESERVED_ROW_KEY {
            return Err(UnclassifiedReason::ReservedCategory);
        }

        Ok(ClassifiedFile {
            period,
            category: category.to_owned(),
            extension,
            badge: self.badges.for_name(name).map(str::to_owned),
            source: entry,
        })
    }

    /// Six leading digits, category by substring against the dictionary.
    fn classify_lenient<'a>(
        &self,
        entry: &'a FileEntry,
    ) -> Result<ClassifiedFile<'a>, UnclassifiedReason> {
        let name = entry.file_name();
        let caps = self
            .lenient
            .captures(name)
            .ok_or(UnclassifiedReason::NamePattern)?;
        let period =
            Period::from_token(&caps[1]).map_err(|_| UnclassifiedReason::NamePattern)?;

        let extension = Utf8Path::new(name)
            .extension()
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .ok_or(UnclassifiedReason::Extension)?;
        if !self.extension_allowed(&extension) {
            return Err(UnclassifiedReason::Extension);
        }

        if !self
            .columns
            .iter()
            .any(|column| name.contains(column.key.as_str()))
        {
            return Err(UnclassifiedReason::NoMatchingColumn);
        }

        let category = lenient_segment(name, extension.len());
        Ok(ClassifiedFile {
            period,
            category: category.to_owned(),
            badge: self.badges.for_name(name).map(str::to_owned),
            extension,
            source: entry,
        })
    }

    fn extension_allowed(&self, dotted: &str) -> bool {
        self.allowed_extensions
            .contains(dotted.trim_start_matches('.'))
    }
}

/// The part of a lenient name between the period and the extension, without
/// leading separators.
fn lenient_segment(name: &str, extension_len: usize) -> &str {
    let end = name.len().saturating_sub(extension_len).max(6);
    name.get(6..end)
        .unwrap_or_default()
        .trim_start_matches(['_', '-', ' '])
}
