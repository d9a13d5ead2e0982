//! Domain types for the docgrid auditor.
//!
//! # Module Organization
//!
//! - [`period`] - `YYYYMM` period keys
//! - [`file`] - Listing entries and classified files
//! - [`column`] - Grid columns
//! - [`cell`] - Aggregation cells
//! - [`status`] - Cell completeness states
//! - [`report`] - The serializable report
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use dg_core::{Cell, CellStatus, Column, FileEntry, Period, Report};
//! ```

pub mod cell;
pub mod column;
pub mod file;
pub mod period;
pub mod report;
pub mod status;

pub use cell::{Cell, CellFile};
pub use column::{Column, RESERVED_ROW_KEY};
pub use file::{ClassifiedFile, FileEntry};
pub use period::{Period, PeriodError};
pub use report::{GridRow, Report};
pub use status::CellStatus;
