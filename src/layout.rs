//! Static layout of the count template
//!
//! Which ledger columns survive and under what name, the blank columns that
//! get appended, and the table that routes records to sheets.

use crate::error::{StocktakeError, StocktakeResult};
use crate::types::ColumnKind;

//==============================================================================
// Input / output contract
//==============================================================================

/// File extensions accepted for the uploaded cost ledger
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Fixed name of the generated workbook
pub const OUTPUT_FILE_NAME: &str = "원가수불부_실사양식_최종.xlsx";

/// MIME type the generated workbook is served with
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Rows shown by the preview surfaces
pub const PREVIEW_ROWS: usize = 10;

/// Number format for the quantity columns
pub const QUANTITY_NUM_FORMAT: &str = "#,##0";

//==============================================================================
// Column allow-list
//==============================================================================

/// A ledger column kept in the count template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceField {
    /// Header as it appears in the ledger
    pub header: &'static str,
    pub kind: ColumnKind,
}

/// Ledger columns kept, in output order
pub const SOURCE_FIELDS: [SourceField; 8] = [
    SourceField {
        header: "품목계정그룹",
        kind: ColumnKind::Category,
    },
    SourceField {
        header: "품목코드",
        kind: ColumnKind::ItemCode,
    },
    SourceField {
        header: "품목명",
        kind: ColumnKind::ItemName,
    },
    SourceField {
        header: "단위",
        kind: ColumnKind::Unit,
    },
    SourceField {
        header: "기초재고",
        kind: ColumnKind::OpeningQty,
    },
    SourceField {
        header: "입고계",
        kind: ColumnKind::InboundQty,
    },
    SourceField {
        header: "출고계",
        kind: ColumnKind::OutboundQty,
    },
    SourceField {
        header: "기말재고",
        kind: ColumnKind::ClosingQty,
    },
];

/// Blank columns appended for manual completion, in output order
pub const PLACEHOLDER_FIELDS: [(&str, ColumnKind); 5] = [
    ("실사수량 계", ColumnKind::CountTotal),
    ("저장위치1", ColumnKind::Location(1)),
    ("저장위치2", ColumnKind::Location(2)),
    ("저장위치3", ColumnKind::Location(3)),
    ("저장위치4", ColumnKind::Location(4)),
];

//==============================================================================
// Period labels
//==============================================================================

/// Month-specific labels for the four renamed quantity columns
///
/// The ledger covers one closing month. Opening stock is labelled with the
/// end of the previous month, movements with the closing month itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodLabels {
    month: u32,
}

impl PeriodLabels {
    /// Closing month the templates were originally built for
    pub const DEFAULT_MONTH: u32 = 12;

    pub fn new(month: u32) -> StocktakeResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(StocktakeError::Validation(format!(
                "period month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { month })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn previous_month(&self) -> u32 {
        if self.month == 1 {
            12
        } else {
            self.month - 1
        }
    }

    /// Renamed header for a quantity column, `None` for every other kind
    pub fn label_for(&self, kind: ColumnKind) -> Option<String> {
        match kind {
            ColumnKind::OpeningQty => Some(format!("{}월말 수량", self.previous_month())),
            ColumnKind::InboundQty => Some(format!("{}월 입고 수량", self.month)),
            ColumnKind::OutboundQty => Some(format!("{}월 출고 수량", self.month)),
            ColumnKind::ClosingQty => Some("기말 수량".to_string()),
            _ => None,
        }
    }

    /// Output header for a kept ledger column
    pub fn output_header(&self, field: &SourceField) -> String {
        self.label_for(field.kind)
            .unwrap_or_else(|| field.header.to_string())
    }
}

impl Default for PeriodLabels {
    fn default() -> Self {
        Self {
            month: Self::DEFAULT_MONTH,
        }
    }
}

//==============================================================================
// Category groups
//==============================================================================

/// One output sheet and the category labels routed to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryGroup {
    pub sheet_name: &'static str,
    pub labels: &'static [&'static str],
}

impl CategoryGroup {
    pub fn matches(&self, category: &str) -> bool {
        self.labels.contains(&category)
    }
}

/// Output sheets in write order
pub const CATEGORY_GROUPS: [CategoryGroup; 4] = [
    CategoryGroup {
        sheet_name: "제품,상품",
        labels: &["제품", "상품", "제품(OEM)"],
    },
    CategoryGroup {
        sheet_name: "반제품",
        labels: &["반제품"],
    },
    CategoryGroup {
        sheet_name: "원재료",
        labels: &["원재료"],
    },
    CategoryGroup {
        sheet_name: "부재료",
        labels: &["부재료"],
    },
];
