//! Grid column descriptors.

use serde::{Deserialize, Serialize};

/// Key of the row period inside a serialized grid row.
///
/// No column may use this key, or it would collide with the period entry.
pub const RESERVED_ROW_KEY: &str = "month";

/// A grid column: the category key files are matched against and the label
/// shown in the header.
///
/// # Examples
///
/// ```
/// use dg_core::Column;
///
/// let column = Column::new("Invoice", "Supplier invoices");
/// assert_eq!(column.key, "Invoice");
/// assert_eq!(Column::discovered("Invoice").label, "Invoice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Matching key, also the row key in serialized output.
    pub key: String,

    /// Header label.
    pub label: String,
}

impl Column {
    /// Creates a column with an explicit label.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// Creates a column discovered from file names; the key doubles as label.
    #[must_use]
    pub fn discovered(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
        }
    }
}
