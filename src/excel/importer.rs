//! Ledger importer - Excel (.xlsx / .xls) → RawTable

use crate::error::{StocktakeError, StocktakeResult};
use crate::layout::ACCEPTED_EXTENSIONS;
use crate::types::{CellValue, RawTable};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::debug;

enum LedgerSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Reads the first worksheet of an uploaded cost ledger
pub struct LedgerImporter {
    source: LedgerSource,
}

impl LedgerImporter {
    /// Import from a file on disk; the extension must be .xlsx or .xls
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: LedgerSource::Path(path.as_ref().to_path_buf()),
        }
    }

    /// Import from an uploaded body; the format is sniffed from the content
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            source: LedgerSource::Bytes(bytes),
        }
    }

    pub fn import(self) -> StocktakeResult<RawTable> {
        match self.source {
            LedgerSource::Path(path) => {
                check_extension(&path)?;
                let mut workbook = open_workbook_auto(&path).map_err(|e| {
                    StocktakeError::InputParse(format!(
                        "Failed to open {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                first_sheet(&mut workbook)
            }
            LedgerSource::Bytes(bytes) => {
                if bytes.is_empty() {
                    return Err(StocktakeError::InputParse(
                        "Uploaded file is empty".to_string(),
                    ));
                }
                let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
                    StocktakeError::InputParse(format!("Failed to open upload: {}", e))
                })?;
                first_sheet(&mut workbook)
            }
        }
    }
}

fn check_extension(path: &Path) -> StocktakeResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(StocktakeError::InputParse(format!(
            "Unsupported file type '{}': expected one of {}",
            path.display(),
            ACCEPTED_EXTENSIONS.join(", ")
        )))
    }
}

fn first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> StocktakeResult<RawTable> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| StocktakeError::InputParse("Workbook has no worksheets".to_string()))??;

    let table = table_from_range(&range);
    debug!(
        columns = table.headers.len(),
        rows = table.row_count(),
        "read ledger sheet"
    );
    Ok(table)
}

/// Split a worksheet range into header row and data rows
pub fn table_from_range(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return RawTable::default();
    };

    let headers = header_row
        .iter()
        .enumerate()
        .map(|(col, cell)| header_name(cell, col))
        .collect();

    let mut table = RawTable::new(headers);
    for row in rows {
        table.add_row(row.iter().map(cell_value).collect());
    }
    table
}

fn header_name(cell: &Data, col: usize) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {}", col),
        Data::String(s) => s.clone(),
        other => cell_value(other).to_string(),
    }
}

/// Map a calamine cell onto the converter's value model
///
/// Dates keep their serial number so they survive the round trip as numbers.
/// Error cells (#N/A, #REF!, ...) count as missing.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
