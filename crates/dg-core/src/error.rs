//! Error types for the dg-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration-related errors
//! that can occur across the workspace.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use dg_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::MissingFile(Utf8PathBuf::from("/etc/docgrid.json"));
/// assert!(error.to_string().contains("/etc/docgrid.json"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {0}")]
    MissingFile(Utf8PathBuf),

    /// No grid is configured, so there is nothing to audit.
    #[error("no grids configured")]
    NoGrids,

    /// Two grids share the same name.
    #[error("duplicate grid name '{0}'")]
    DuplicateGrid(String),

    /// A grid option has an invalid value.
    #[error("invalid option '{option}' in grid '{grid}': {reason}")]
    InvalidGridOption {
        /// The grid the option belongs to.
        grid: String,
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// A top-level configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidGridOption`] error.
    pub fn grid_option(
        grid: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidGridOption {
            grid: grid.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }
}
