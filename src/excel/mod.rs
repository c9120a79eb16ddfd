//! Excel import/export for the stocktake converter
//!
//! - Import: cost ledger (.xlsx / .xls) → `RawTable`
//! - Export: `TransformedTable` → count template workbook (.xlsx), one sheet
//!   per category group

mod exporter;
mod importer;

pub use exporter::{export_sheets, ExcelExporter, ExportReport, SheetSummary, SpreadsheetBuffer};
pub use importer::{cell_value, table_from_range, LedgerImporter};
