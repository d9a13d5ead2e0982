//! Configuration structures for the docgrid auditor.
//!
//! This module provides configuration types for all components:
//!
//! - [`GridConfig`] - One audited folder: root, classification policy, columns
//! - [`ServerConfig`] - HTTP bind address and route prefix
//! - [`LogConfig`] - Optional append-only log file
//! - [`Config`] - Root configuration combining all settings
//!
//! The configuration is loaded once at startup and handed to the report
//! pipeline by reference. Nothing downstream reads it from global state.
//!
//! # File Format
//!
//! ```json
//! {
//!   "server": { "bind": "127.0.0.1:3001", "base_path": "" },
//!   "grids": [
//!     {
//!       "name": "main",
//!       "label": "Main Files Status Grid",
//!       "root": "/srv/documents/main",
//!       "policy": "dictionary",
//!       "columns": [{ "key": "Invoice", "label": "Invoices" }]
//!     }
//!   ]
//! }
//! ```
//!
//! The older single-folder layout (`folderPath` plus a `dictionary` object) is
//! still accepted by [`Config::from_json_str`] and becomes a single `main` grid.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hash::fx_hash_set;
use crate::types::{Column, RESERVED_ROW_KEY};

/// Extensions accepted by default, lowercase and without the leading dot.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "csv", "pdf", "png", "jpg", "jpeg", "bmp", "xls", "xlsx",
];

/// How grid columns are derived and how files are matched to them.
///
/// # Examples
///
/// ```
/// use dg_core::CategoryPolicy;
///
/// let policy: CategoryPolicy = serde_json::from_str(r#""dictionary""#).unwrap();
/// assert_eq!(policy, CategoryPolicy::Dictionary);
/// assert_eq!(CategoryPolicy::default(), CategoryPolicy::Dynamic);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryPolicy {
    /// Columns are the distinct category segments found in strictly matching
    /// names (`YYYYMM_<category>.<ext>`), sorted ascending. Matching is exact.
    #[default]
    Dynamic,

    /// Columns come from the configured dictionary. A file belongs to every
    /// column whose key occurs anywhere in its name.
    Dictionary,
}

impl CategoryPolicy {
    /// Returns the configuration spelling of this policy.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dynamic => "dynamic",
            Self::Dictionary => "dictionary",
        }
    }
}

/// Configuration for one audited folder.
///
/// # Examples
///
/// ```
/// use dg_core::{CategoryPolicy, GridConfig};
///
/// let grid = GridConfig::default();
/// assert_eq!(grid.name, "main");
/// assert_eq!(grid.policy, CategoryPolicy::Dynamic);
/// assert!(grid.allows_extension("PDF"));
/// assert!(!grid.allows_extension("exe"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Identifier used in `?type=` and on the command line.
    pub name: String,

    /// Human readable title shown above the grid.
    pub label: String,

    /// Root folder whose recursive listing feeds the grid.
    pub root: Utf8PathBuf,

    /// Column derivation and matching policy.
    pub policy: CategoryPolicy,

    /// Fixed dictionary of columns, in display order.
    ///
    /// Required under [`CategoryPolicy::Dictionary`], ignored otherwise.
    pub columns: Vec<Column>,

    /// Accepted file extensions, compared case-insensitively.
    pub allowed_extensions: Vec<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            name: "main".to_owned(),
            label: "File Status Grid".to_owned(),
            root: Utf8PathBuf::new(),
            policy: CategoryPolicy::Dynamic,
            columns: Vec::new(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_owned())
                .collect(),
        }
    }
}

impl GridConfig {
    /// Creates a grid with default settings rooted at `root`.
    #[must_use]
    pub fn new(name: impl Into<String>, root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            ..Self::default()
        }
    }

    /// Switches the grid to the dictionary policy with the given columns.
    #[must_use]
    pub fn with_dictionary(mut self, columns: Vec<Column>) -> Self {
        self.policy = CategoryPolicy::Dictionary;
        self.columns = columns;
        self
    }

    /// Returns `true` if `ext` (with or without a leading dot) is accepted.
    #[must_use]
    pub fn allows_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Checks the grid for settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidOption {
                option: "grids.name".to_owned(),
                reason: "grid name must not be empty".to_owned(),
            });
        }
        if self.root.as_str().is_empty() {
            return Err(ConfigError::grid_option(
                &self.name,
                "root",
                "root folder is required",
            ));
        }
        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::grid_option(
                &self.name,
                "allowed_extensions",
                "at least one extension is required",
            ));
        }
        if self.policy == CategoryPolicy::Dictionary {
            if self.columns.is_empty() {
                return Err(ConfigError::grid_option(
                    &self.name,
                    "columns",
                    "dictionary policy needs at least one column",
                ));
            }
            let mut seen = fx_hash_set();
            for column in &self.columns {
                if column.key.is_empty() {
                    return Err(ConfigError::grid_option(
                        &self.name,
                        "columns",
                        "column keys must not be empty",
                    ));
                }
                if column.key == RESERVED_ROW_KEY {
                    return Err(ConfigError::grid_option(
                        &self.name,
                        "columns",
                        format!("'{RESERVED_ROW_KEY}' is reserved for the row period"),
                    ));
                }
                if !seen.insert(column.key.as_str()) {
                    return Err(ConfigError::grid_option(
                        &self.name,
                        "columns",
                        format!("duplicate column key '{}'", column.key),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Configuration for the HTTP boundary.
///
/// # Examples
///
/// ```
/// use dg_core::ServerConfig;
///
/// let config = ServerConfig::default();
/// assert_eq!(config.bind, "127.0.0.1:3001");
/// assert!(config.base_path.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,

    /// Optional prefix every route is mounted under (e.g. `/conta_check_docs`).
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3001".to_owned(),
            base_path: String::new(),
        }
    }
}

impl ServerConfig {
    /// Returns the route prefix normalized to `/prefix`, or `None` when unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use dg_core::ServerConfig;
    ///
    /// let mut config = ServerConfig::default();
    /// assert_eq!(config.normalized_base_path(), None);
    ///
    /// config.base_path = "conta_check_docs/".to_owned();
    /// assert_eq!(config.normalized_base_path().as_deref(), Some("/conta_check_docs"));
    /// ```
    #[must_use]
    pub fn normalized_base_path(&self) -> Option<String> {
        let trimmed = self.base_path.trim().trim_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(format!("/{trimmed}"))
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Append-only log file. Console logging is always enabled.
    pub file: Option<Utf8PathBuf>,
}

/// Root configuration for docgrid.
///
/// # Examples
///
/// ```
/// use dg_core::Config;
///
/// let config = Config::from_json_str(
///     r#"{"grids": [{"name": "main", "root": "/srv/docs"}]}"#,
/// ).unwrap();
/// assert_eq!(config.grids.len(), 1);
/// assert_eq!(config.default_grid().map(|g| g.name.as_str()), Some("main"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP boundary configuration.
    pub server: ServerConfig,

    /// Audited folders, in tab order.
    pub grids: Vec<GridConfig>,

    /// Logging configuration.
    pub log: LogConfig,
}

/// Keys of the legacy single-folder configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyLayout {
    #[serde(rename = "folderPath")]
    folder_path: Option<Utf8PathBuf>,
    dictionary: Option<serde_json::Map<String, serde_json::Value>>,
}

impl LegacyLayout {
    fn into_grid(self) -> Result<Option<GridConfig>, ConfigError> {
        let Some(root) = self.folder_path else {
            return Ok(None);
        };

        let mut grid = GridConfig::new("main", root);
        if let Some(dictionary) = self.dictionary {
            let mut columns = Vec::with_capacity(dictionary.len());
            for (key, value) in dictionary {
                let serde_json::Value::String(label) = value else {
                    return Err(ConfigError::InvalidOption {
                        option: "dictionary".to_owned(),
                        reason: format!("label for '{key}' must be a string"),
                    });
                };
                columns.push(Column::new(key, label));
            }
            grid = grid.with_dictionary(columns);
        }
        Ok(Some(grid))
    }
}

impl Config {
    /// Reads and validates a configuration file.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_owned()));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parses and validates configuration JSON.
    ///
    /// When no `grids` are given but the legacy `folderPath` key is present,
    /// a single `main` grid is synthesized from `folderPath` and `dictionary`.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw)?;
        if config.grids.is_empty() {
            let legacy: LegacyLayout = serde_json::from_str(raw)?;
            if let Some(grid) = legacy.into_grid()? {
                config.grids.push(grid);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks every grid and the relationships between them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grids.is_empty() {
            return Err(ConfigError::NoGrids);
        }
        let mut names = fx_hash_set();
        for grid in &self.grids {
            grid.validate()?;
            if !names.insert(grid.name.as_str()) {
                return Err(ConfigError::DuplicateGrid(grid.name.clone()));
            }
        }
        Ok(())
    }

    /// Looks up a grid by name, falling back to the first grid for `None`.
    #[must_use]
    pub fn grid(&self, name: Option<&str>) -> Option<&GridConfig> {
        match name {
            Some(name) => self.grids.iter().find(|grid| grid.name == name),
            None => self.default_grid(),
        }
    }

    /// Returns the first configured grid.
    #[inline]
    #[must_use]
    pub fn default_grid(&self) -> Option<&GridConfig> {
        self.grids.first()
    }

    /// Returns every configured root folder.
    pub fn roots(&self) -> impl Iterator<Item = &Utf8Path> {
        self.grids.iter().map(|grid| grid.root.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_config_defaults() {
        let grid = GridConfig::default();
        assert_eq!(grid.name, "main");
        assert_eq!(grid.policy, CategoryPolicy::Dynamic);
        assert!(grid.columns.is_empty());
        assert_eq!(grid.allowed_extensions.len(), DEFAULT_ALLOWED_EXTENSIONS.len());
    }

    #[test]
    fn test_allows_extension_is_case_insensitive() {
        let grid = GridConfig::default();
        assert!(grid.allows_extension("pdf"));
        assert!(grid.allows_extension(".XLSX"));
        assert!(grid.allows_extension("Jpeg"));
        assert!(!grid.allows_extension("docx"));
        assert!(!grid.allows_extension(""));
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "127.0.0.1:3001");
        assert_eq!(config.normalized_base_path(), None);
    }

    #[test]
    fn test_normalized_base_path() {
        let config = ServerConfig {
            base_path: "/conta_check_docs".to_owned(),
            ..ServerConfig::default()
        };
        assert_eq!(
            config.normalized_base_path().as_deref(),
            Some("/conta_check_docs")
        );

        let config = ServerConfig {
            base_path: "/".to_owned(),
            ..ServerConfig::default()
        };
        assert_eq!(config.normalized_base_path(), None);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"grids": [{"name": "support", "root": "/docs/support"}]}"#;
        let config = Config::from_json_str(json).unwrap();
        let grid = &config.grids[0];
        assert_eq!(grid.name, "support");
        assert_eq!(grid.root.as_str(), "/docs/support");
        assert_eq!(grid.policy, CategoryPolicy::Dynamic);
        assert_eq!(config.server.bind, "127.0.0.1:3001");
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_legacy_layout_preserves_dictionary_order() {
        let json = r#"{
            "folderPath": "/srv/conta",
            "dictionary": {"Zeta": "Last key", "Alpha": "First key"}
        }"#;
        let config = Config::from_json_str(json).unwrap();
        let grid = config.default_grid().unwrap();
        assert_eq!(grid.name, "main");
        assert_eq!(grid.root.as_str(), "/srv/conta");
        assert_eq!(grid.policy, CategoryPolicy::Dictionary);
        let keys: Vec<_> = grid.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["Zeta", "Alpha"]);
        assert_eq!(grid.columns[0].label, "Last key");
    }

    #[test]
    fn test_legacy_layout_rejects_non_string_label() {
        let json = r#"{"folderPath": "/srv/conta", "dictionary": {"Invoice": 3}}"#;
        let err = Config::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_config() {
        let err = Config::from_json_str("{}").unwrap_err();
        assert!(matches!(err, ConfigError::NoGrids));
    }

    #[test]
    fn test_validate_rejects_duplicate_grids() {
        let json = r#"{"grids": [
            {"name": "main", "root": "/a"},
            {"name": "main", "root": "/b"}
        ]}"#;
        let err = Config::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateGrid(name) if name == "main"));
    }

    #[test]
    fn test_validate_rejects_dictionary_without_columns() {
        let json = r#"{"grids": [{"name": "main", "root": "/a", "policy": "dictionary"}]}"#;
        let err = Config::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidGridOption { option, .. } if option == "columns"));
    }

    #[test]
    fn test_validate_rejects_reserved_column_key() {
        let grid = GridConfig::new("main", "/a")
            .with_dictionary(vec![Column::new(RESERVED_ROW_KEY, "Month")]);
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let grid = GridConfig::default();
        let err = grid.validate().unwrap_err();
        assert!(err.to_string().contains("root"));
    }

    #[test]
    fn test_grid_lookup() {
        let config = Config {
            grids: vec![
                GridConfig::new("main", "/a"),
                GridConfig::new("periodic", "/b"),
            ],
            ..Config::default()
        };
        assert_eq!(config.grid(None).map(|g| g.name.as_str()), Some("main"));
        assert_eq!(
            config.grid(Some("periodic")).map(|g| g.root.as_str()),
            Some("/b")
        );
        assert!(config.grid(Some("unknown")).is_none());
        assert_eq!(config.roots().count(), 2);
    }

    #[test]
    fn test_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&CategoryPolicy::Dynamic).unwrap(),
            r#""dynamic""#
        );
        assert_eq!(
            serde_json::to_string(&CategoryPolicy::Dictionary).unwrap(),
            r#""dictionary""#
        );
        assert_eq!(CategoryPolicy::Dictionary.as_str(), "dictionary");
    }
}
