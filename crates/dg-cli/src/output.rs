//! Terminal rendering of scan results.
//!
//! Tables list periods newest first, the same order the web UI uses.

use std::io::{self, Write};

use dg_core::{CellStatus, Report};
use dg_scanner::ReportSummary;
use unicode_width::UnicodeWidthStr;

const MONTH_HEADER: &str = "Month";

/// Writes the cell-state summary for one grid.
pub fn write_summary(
    out: &mut impl Write,
    grid: &str,
    summary: &ReportSummary,
) -> io::Result<()> {
    writeln!(out)?;
    let title = format!("Document Status: {grid}");
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.width()))?;
    writeln!(out)?;
    writeln!(
        out,
        "Periods: {}  Categories: {}  Cells: {}",
        summary.months, summary.columns, summary.cells
    )?;
    writeln!(
        out,
        "  {} Complete:   {}",
        CellStatus::Complete.symbol(),
        summary.complete
    )?;
    writeln!(
        out,
        "  {} Missing:    {}",
        CellStatus::Missing.symbol(),
        summary.missing
    )?;
    writeln!(
        out,
        "  {} Duplicate:  {}",
        CellStatus::Duplicate.symbol(),
        summary.duplicate
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Files: {} classified, {} unprocessed",
        summary.classified_files, summary.unclassified
    )?;
    writeln!(out, "Completeness: {:.1}%", summary.completeness_percent())?;
    Ok(())
}

/// Writes the grid as a table, one row per period, newest first.
pub fn write_grid(out: &mut impl Write, report: &Report) -> io::Result<()> {
    if report.grid.is_empty() {
        writeln!(out)?;
        writeln!(out, "No classified files.")?;
        return Ok(());
    }

    let month_width = MONTH_HEADER.width().max("YYYY/MM".len());
    let widths: Vec<usize> = report
        .columns
        .iter()
        .map(|column| column.label.width().max(2))
        .collect();

    writeln!(out)?;
    write!(out, "{}", pad(MONTH_HEADER, month_width))?;
    for (column, width) in report.columns.iter().zip(&widths) {
        write!(out, " | {}", pad(&column.label, *width))?;
    }
    writeln!(out)?;

    let rule_len = month_width + widths.iter().map(|w| w + 3).sum::<usize>();
    writeln!(out, "{}", "-".repeat(rule_len))?;

    for row in report.grid.iter().rev() {
        write!(out, "{}", pad(&row.month.formatted(), month_width))?;
        for (cell, width) in row.cells.iter().zip(&widths) {
            write!(out, " | {}", pad(cell.status().symbol(), *width))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes every cell that needs attention, and the unprocessed files.
pub fn write_details(out: &mut impl Write, report: &Report) -> io::Result<()> {
    let mut attention: Vec<_> = report
        .cells()
        .filter(|(_, _, cell)| cell.status().needs_attention())
        .collect();
    attention.sort_by(|a, b| b.0.cmp(&a.0));

    if !attention.is_empty() {
        writeln!(out)?;
        writeln!(out, "Needs attention ({}):", attention.len())?;
        for (month, column, cell) in attention {
            writeln!(
                out,
                "  {} {} {}: {}",
                cell.status().symbol(),
                month.formatted(),
                column.label,
                cell.status().label()
            )?;
            for path in cell.paths() {
                writeln!(out, "      {path}")?;
            }
        }
    }

    let unprocessed: Vec<_> = report.unprocessed().collect();
    if !unprocessed.is_empty() {
        writeln!(out)?;
        writeln!(out, "Unprocessed files ({}):", unprocessed.len())?;
        for path in unprocessed {
            writeln!(out, "  {path}")?;
        }
    }
    Ok(())
}

/// Left-aligns `text` in `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}
