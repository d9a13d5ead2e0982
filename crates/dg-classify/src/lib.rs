//! File name classification for docgrid.
//!
//! Turns a [`FileEntry`](dg_core::FileEntry) into either a
//! [`ClassifiedFile`](dg_core::ClassifiedFile) (period, category, extension,
//! badge) or an unclassified verdict with a reason. Two naming policies are
//! supported:
//!
//! - **Dynamic**: `YYYYMM_<category>.<ext>`; the category segment is the
//!   column key, compared exactly.
//! - **Dictionary**: the name starts with six digits; a file belongs to every
//!   configured column whose key occurs anywhere in the name.
//!
//! The allowed extension set applies under both policies. Classification is
//! pure and total; the only fallible step is building the [`Classifier`].

#![deny(clippy::all)]
#![warn(missing_docs)]

mod badge;
mod classifier;
mod error;
pub mod patterns;

pub use badge::BadgeExtractor;
pub use classifier::{Classification, Classifier, UnclassifiedReason};
pub use error::ClassifyError;
