//! Stocktake - cost ledger to physical inventory count workbook
//!
//! Reads a cost ledger (원가수불부) exported as .xlsx or .xls, keeps the
//! columns a stock count needs, appends blank count/location columns and
//! writes one formatted sheet per item category group.
//!
//! # Features
//!
//! - Fixed column allow-list with period-specific quantity labels
//! - Zero-filled blanks, five blank placeholders for the counters
//! - Sheets per category group (제품,상품 / 반제품 / 원재료 / 부재료)
//! - Per-column widths, borders, `#,##0` quantities
//! - CLI (`stocktake`) and HTTP upload/download (`stocktake-server`)
//!
//! # Example
//!
//! ```no_run
//! use stocktake::pipeline::convert_file;
//! use stocktake::transform::TransformOptions;
//! use std::path::Path;
//!
//! let buffer = convert_file(Path::new("ledger.xlsx"), &TransformOptions::default())?;
//!
//! for sheet in &buffer.report.sheets {
//!     println!("{}: {} rows", sheet.name, sheet.rows);
//! }
//! std::fs::write("count.xlsx", &buffer.bytes)?;
//! # Ok::<(), stocktake::error::StocktakeError>(())
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod excel;
pub mod layout;
pub mod pipeline;
pub mod transform;
pub mod types;

// Re-export commonly used types
pub use error::{StocktakeError, StocktakeResult};
pub use excel::{export_sheets, SpreadsheetBuffer};
pub use transform::{normalize, TransformOptions};
pub use types::{CellValue, RawTable, TransformedRecord, TransformedTable};
