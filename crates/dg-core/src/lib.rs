//! Core types, configuration, and errors for the docgrid auditor.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - Domain types ([`Period`], [`FileEntry`], [`ClassifiedFile`], [`Cell`], [`Report`])
//! - Configuration structures ([`Config`], [`GridConfig`], [`CategoryPolicy`])
//! - Error types for configuration loading ([`ConfigError`])
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)
//!
//! Nothing in this crate touches the filesystem except [`Config::load`]. The
//! report pipeline is a pure function of a file listing and a [`GridConfig`].

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{
    CategoryPolicy, Config, DEFAULT_ALLOWED_EXTENSIONS, GridConfig, LogConfig, ServerConfig,
};
pub use error::ConfigError;
pub use hash::{FxHashMap, FxHashSet, fx_hash_map, fx_hash_set};
pub use types::{
    Cell, CellFile, CellStatus, ClassifiedFile, Column, FileEntry, GridRow, Period, PeriodError,
    RESERVED_ROW_KEY, Report,
};
