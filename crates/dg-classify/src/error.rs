//! Error types for the dg-classify crate.
//!
//! Classification itself never fails: every name is either classified or
//! unclassified. The only error is a name pattern that does not compile,
//! which can happen only when the classifier is built.

/// Errors that can occur while building a [`Classifier`](crate::Classifier).
///
/// # Examples
///
/// ```
/// use dg_classify::ClassifyError;
///
/// fn handle_error(err: ClassifyError) {
///     match err {
///         ClassifyError::PatternCompile { name, .. } => {
///             eprintln!("pattern {name} failed to compile");
///         }
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// A built-in name pattern failed to compile.
    #[error("failed to compile {name} pattern: {source}")]
    PatternCompile {
        /// Which pattern failed.
        name: &'static str,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}
