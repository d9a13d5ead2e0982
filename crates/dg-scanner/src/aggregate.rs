//! The grid aggregator.
//!
//! Buckets classified files into the dense period × column matrix. Every
//! cell of the cross product exists; files land in cells in the order they
//! were listed, so a cell's first path is stable across scans of the same
//! folder.

use dg_classify::Classifier;
use dg_core::{
    CategoryPolicy, Cell, ClassifiedFile, Column, FxHashMap, GridRow, Period, fx_hash_map,
    hash::fx_hash_map_with_capacity,
};

/// The distinct categories of `files`, sorted ascending, as discovered
/// columns.
#[must_use]
pub fn discover_columns(files: &[ClassifiedFile<'_>]) -> Vec<Column> {
    let mut keys: Vec<&str> = files.iter().map(|f| f.category.as_str()).collect();
    keys.sort_unstable();
    keys.dedup();
    keys.into_iter().map(Column::discovered).collect()
}

/// Builds one [`GridRow`] per axis period with one [`Cell`] per column.
///
/// Under the dynamic policy a file matches the column whose key equals its
/// category. Under the dictionary policy it matches every column whose key
/// occurs in its name, so one file can count in several cells of a row.
/// Files whose period is not on the axis are ignored.
#[must_use]
pub fn aggregate(
    axis: &[Period],
    columns: &[Column],
    files: &[ClassifiedFile<'_>],
    classifier: &Classifier,
) -> Vec<GridRow> {
    let mut grid: Vec<GridRow> = axis
        .iter()
        .map(|&month| GridRow {
            month,
            cells: vec![Cell::default(); columns.len()],
        })
        .collect();

    let rows: FxHashMap<Period, usize> = {
        let mut rows = fx_hash_map_with_capacity(axis.len());
        rows.extend(axis.iter().enumerate().map(|(idx, &p)| (p, idx)));
        rows
    };
    let exact = classifier.policy() == CategoryPolicy::Dynamic;
    let by_key: FxHashMap<&str, usize> = if exact {
        let mut by_key = fx_hash_map();
        by_key.extend(columns.iter().enumerate().map(|(idx, c)| (c.key.as_str(), idx)));
        by_key
    } else {
        fx_hash_map()
    };

    for file in files {
        let Some(&row) = rows.get(&file.period) else {
            continue;
        };
        let cells = &mut grid[row].cells;

        if exact {
            if let Some(&col) = by_key.get(file.category.as_str()) {
                cells[col].push(file.path(), file.badge.clone());
            }
            continue;
        }
        for (col, column) in columns.iter().enumerate() {
            if classifier.matches(file, column) {
                cells[col].push(file.path(), file.badge.clone());
            }
        }
    }

    grid
}
