//! The file viewer.
//!
//! Renders one contained file as an HTML page: text in a `<pre>`, CSV and
//! spreadsheets as tables, images and PDFs embedded from the raw file route.
//! Reading happens on a blocking thread; everything else is string building
//! through the `view.html` template, which escapes all file content.

use std::path::Path;

use askama::Template;
use calamine::{Reader, open_workbook_auto};

use crate::error::ViewError;

/// How a file is shown, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// `txt`
    Text,
    /// `csv`
    Csv,
    /// `png`, `jpg`, `jpeg`, `bmp`
    Image,
    /// `pdf`
    Pdf,
    /// `xls`, `xlsx`
    Spreadsheet,
}

impl ViewKind {
    /// Picks the renderer for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::UnsupportedType`] for any other extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use dg_server::ViewKind;
    ///
    /// assert_eq!(ViewKind::for_path("a/202401_Bank.XLSX".as_ref()).ok(), Some(ViewKind::Spreadsheet));
    /// assert!(ViewKind::for_path("a/202401_Bank.docx".as_ref()).is_err());
    /// ```
    pub fn for_path(path: &Path) -> Result<Self, ViewError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "png" | "jpg" | "jpeg" | "bmp" => Ok(Self::Image),
            "pdf" => Ok(Self::Pdf),
            "xls" | "xlsx" => Ok(Self::Spreadsheet),
            _ => Err(ViewError::UnsupportedType(format!(".{ext}"))),
        }
    }
}

/// One table on the page: a CSV file or one worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Caption (worksheet name); empty for CSV.
    pub name: String,
    /// Cell text, row by row.
    pub rows: Vec<Vec<String>>,
}

#[derive(Template)]
#[template(path = "view.html")]
struct ViewPage<'a> {
    title: &'a str,
    text: Option<String>,
    tables: Vec<Table>,
    image_src: Option<String>,
    pdf_src: Option<String>,
}

/// Renders the viewer page for `path`.
///
/// `raw_href` is the URL of the raw file route for this path; images and
/// PDFs load from it. Blocks on file reads, so call it from a blocking task.
pub fn render(path: &Path, kind: ViewKind, raw_href: &str) -> Result<String, ViewError> {
    let title = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let mut page = ViewPage {
        title,
        text: None,
        tables: Vec::new(),
        image_src: None,
        pdf_src: None,
    };

    match kind {
        ViewKind::Text => {
            let bytes = std::fs::read(path)?;
            page.text = Some(String::from_utf8_lossy(&bytes).into_owned());
        }
        ViewKind::Csv => page.tables.push(read_csv(path)?),
        ViewKind::Spreadsheet => page.tables = read_workbook(path)?,
        ViewKind::Image => page.image_src = Some(raw_href.to_owned()),
        ViewKind::Pdf => page.pdf_src = Some(raw_href.to_owned()),
    }

    Ok(page.render()?)
}

fn read_csv(path: &Path) -> Result<Table, ViewError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }

    Ok(Table {
        name: String::new(),
        rows,
    })
}

fn read_workbook(path: &Path) -> Result<Vec<Table>, ViewError> {
    let mut workbook = open_workbook_auto(path)?;

    let mut tables = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let rows = range
            .rows()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        tables.push(Table { name, rows });
    }
    Ok(tables)
}
