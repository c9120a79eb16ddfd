//! End-to-end conversion: ledger in, count template workbook out
//!
//! Every call recomputes everything from the input. Nothing is cached
//! between calls.

use crate::error::StocktakeResult;
use crate::excel::{ExcelExporter, LedgerImporter, SpreadsheetBuffer};
use crate::transform::{normalize, TransformOptions};
use crate::types::TransformedTable;
use std::path::Path;

/// Read and normalize a ledger file
pub fn load_file(path: &Path, options: &TransformOptions) -> StocktakeResult<TransformedTable> {
    let raw = LedgerImporter::from_path(path).import()?;
    Ok(normalize(&raw, options))
}

/// Read and normalize an uploaded ledger
pub fn load_bytes(bytes: Vec<u8>, options: &TransformOptions) -> StocktakeResult<TransformedTable> {
    let raw = LedgerImporter::from_bytes(bytes).import()?;
    Ok(normalize(&raw, options))
}

/// Convert an uploaded ledger into the count template workbook
pub fn convert_bytes(
    bytes: Vec<u8>,
    options: &TransformOptions,
) -> StocktakeResult<SpreadsheetBuffer> {
    let table = load_bytes(bytes, options)?;
    ExcelExporter::new().export(&table)
}

/// Convert a ledger file into the count template workbook
pub fn convert_file(path: &Path, options: &TransformOptions) -> StocktakeResult<SpreadsheetBuffer> {
    let table = load_file(path, options)?;
    ExcelExporter::new().export(&table)
}
