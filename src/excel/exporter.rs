//! Excel exporter implementation - count template → multi-sheet .xlsx

use crate::error::{StocktakeError, StocktakeResult};
use crate::layout::QUANTITY_NUM_FORMAT;
use crate::transform::{group_by_category, GroupedSheets};
use crate::types::{CategorySheet, CellValue, Column, ColumnKind, TransformedTable};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Rows written to one output sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
}

/// What an export wrote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub sheets: Vec<SheetSummary>,
    /// Records left out because their category matched no sheet
    pub unrouted_rows: usize,
}

impl ExportReport {
    pub fn from_grouped(grouped: &GroupedSheets<'_>) -> Self {
        Self {
            sheets: grouped
                .sheets
                .iter()
                .map(|sheet| SheetSummary {
                    name: sheet.name.to_string(),
                    rows: sheet.records.len(),
                })
                .collect(),
            unrouted_rows: grouped.unrouted,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.rows).sum()
    }
}

/// Generated workbook held in memory
///
/// When no sheet has rows the workbook would be empty, which xlsx cannot
/// express; `bytes` is then empty as well.
#[derive(Debug, Clone)]
pub struct SpreadsheetBuffer {
    pub bytes: Vec<u8>,
    pub report: ExportReport,
}

impl SpreadsheetBuffer {
    pub fn sheet_count(&self) -> usize {
        self.report.sheets.len()
    }
}

/// Cell formats shared by every sheet
struct SheetFormats {
    header: Format,
    quantity: Format,
    text: Format,
}

impl SheetFormats {
    fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let quantity = Format::new()
            .set_num_format(QUANTITY_NUM_FORMAT)
            .set_align(FormatAlign::Right)
            .set_border(FormatBorder::Thin);

        let text = Format::new()
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin);

        Self {
            header,
            quantity,
            text,
        }
    }

    /// Data cell format, decided by the column alone
    fn for_kind(&self, kind: ColumnKind) -> &Format {
        if kind.is_quantity() {
            &self.quantity
        } else {
            &self.text
        }
    }
}

/// Excel exporter for the count template
pub struct ExcelExporter {
    formats: SheetFormats,
}

impl Default for ExcelExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcelExporter {
    pub fn new() -> Self {
        Self {
            formats: SheetFormats::new(),
        }
    }

    /// Export the template as one sheet per non-empty category group
    pub fn export(&self, table: &TransformedTable) -> StocktakeResult<SpreadsheetBuffer> {
        let grouped = group_by_category(table);
        let report = ExportReport::from_grouped(&grouped);

        if grouped.sheets.is_empty() {
            info!("no records matched any category group; nothing to write");
            return Ok(SpreadsheetBuffer {
                bytes: Vec::new(),
                report,
            });
        }

        let mut workbook = Workbook::new();
        for sheet in &grouped.sheets {
            self.export_sheet(&mut workbook, &table.columns, sheet)?;
        }

        let bytes = workbook
            .save_to_buffer()
            .map_err(|e| StocktakeError::Export(format!("Failed to build workbook: {}", e)))?;

        info!(
            sheets = report.sheets.len(),
            rows = report.total_rows(),
            unrouted = report.unrouted_rows,
            bytes = bytes.len(),
            "exported count template"
        );

        Ok(SpreadsheetBuffer { bytes, report })
    }

    /// Export and write the workbook to disk
    ///
    /// An empty export still produces a (zero-byte) file, mirroring the
    /// download surface.
    pub fn export_to_file(
        &self,
        table: &TransformedTable,
        output_path: &Path,
    ) -> StocktakeResult<ExportReport> {
        let buffer = self.export(table)?;
        fs::write(output_path, &buffer.bytes)?;
        Ok(buffer.report)
    }

    fn export_sheet(
        &self,
        workbook: &mut Workbook,
        columns: &[Column],
        sheet: &CategorySheet<'_>,
    ) -> StocktakeResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).map_err(|e| {
            StocktakeError::Export(format!("Failed to set worksheet name: {}", e))
        })?;

        for (col_idx, column) in columns.iter().enumerate() {
            let col = col_idx as u16;
            worksheet
                .set_column_width(col, column.kind.width())
                .map_err(|e| StocktakeError::Export(format!("Failed to set width: {}", e)))?;
            worksheet
                .write_string_with_format(0, col, &column.name, &self.formats.header)
                .map_err(|e| StocktakeError::Export(format!("Failed to write header: {}", e)))?;
        }

        for (row_idx, record) in sheet.records.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            for (col_idx, column) in columns.iter().enumerate() {
                let value = record.get(col_idx).unwrap_or(&CellValue::Empty);
                self.write_cell(
                    worksheet,
                    row,
                    col_idx as u16,
                    value,
                    self.formats.for_kind(column.kind),
                )?;
            }
        }

        debug!(sheet = sheet.name, rows = sheet.records.len(), "wrote sheet");
        Ok(())
    }

    /// Write one data cell; blanks are still written so they carry the border
    fn write_cell(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
        format: &Format,
    ) -> StocktakeResult<()> {
        let result = match value {
            CellValue::Empty => worksheet.write_blank(row, col, format),
            CellValue::Text(s) if s.is_empty() => worksheet.write_blank(row, col, format),
            CellValue::Text(s) => worksheet.write_string_with_format(row, col, s, format),
            CellValue::Int(i) => worksheet.write_number_with_format(row, col, *i as f64, format),
            CellValue::Number(n) => worksheet.write_number_with_format(row, col, *n, format),
            CellValue::Bool(b) => worksheet.write_boolean_with_format(row, col, *b, format),
        };
        result
            .map(|_| ())
            .map_err(|e| StocktakeError::Export(format!("Failed to write cell: {}", e)))
    }
}

/// Export the template with the default formats
pub fn export_sheets(table: &TransformedTable) -> StocktakeResult<SpreadsheetBuffer> {
    ExcelExporter::new().export(table)
}
