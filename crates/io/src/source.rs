// Source file detection and decoding into lines or rows

use std::path::Path;

use log::info;
use nplboard_extract::model::Shape;
use nplboard_extract::{extract_lines, extract_rows, Cell, ExtractConfig, ReportKind, Table};

use crate::{pdf, xlsx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Text pulled out of a PDF with `pdftotext -layout`.
    Pdf,
    /// Worksheet cells read at fixed column offsets.
    Spreadsheet,
    /// Already-extracted text, one line per table line.
    Text,
}

impl SourceFormat {
    /// Detect by file extension (case-insensitive).
    pub fn detect(path: &Path) -> Result<Self, String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Spreadsheet),
            "txt" => Ok(Self::Text),
            "" => Err(format!("cannot detect format of '{}': no file extension", path.display())),
            other => Err(format!(
                "unsupported file type '.{}' (expected .pdf, .xlsx, .xlsm, .xls, .xlsb, .ods or .txt)",
                other
            )),
        }
    }
}

/// Decoded source content.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Lines(Vec<String>),
    Rows(Vec<Vec<Cell>>),
}

/// Decode `path` into lines or rows. `sheet` names the worksheet for
/// spreadsheet sources and is ignored otherwise.
pub fn read_source(path: &Path, sheet: Option<&str>) -> Result<Source, String> {
    match SourceFormat::detect(path)? {
        SourceFormat::Pdf => pdf::pdf_lines(path).map(Source::Lines),
        SourceFormat::Spreadsheet => xlsx::read_rows(path, sheet).map(Source::Rows),
        SourceFormat::Text => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
            Ok(Source::Lines(pdf::text_lines(&text)))
        }
    }
}

/// Decode and extract one report file.
pub fn extract_file(kind: ReportKind, path: &Path, config: &ExtractConfig) -> Result<Table, String> {
    let sheet = match kind.shape() {
        Shape::Ledger => config.sheet.ledger.sheet.as_deref(),
        Shape::Daily => config.sheet.daily.sheet.as_deref(),
    };
    let table = match read_source(path, sheet)? {
        Source::Lines(lines) => extract_lines(kind, &lines, config),
        Source::Rows(rows) => extract_rows(kind, &rows, config),
    };
    info!("{}: extracted from {}", kind, path.display());
    Ok(table)
}
