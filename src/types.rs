use serde::Serialize;
use std::fmt;

//==============================================================================
// Cell values
//==============================================================================

/// A single cell, as read from the ledger or written to the count template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Blank in the ledger sense: no value, or an empty string
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

//==============================================================================
// Raw ledger
//==============================================================================

/// First worksheet of the uploaded ledger: header row plus data rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// One RawRecord per row, aligned with `headers`
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    /// Position of a header; duplicated headers resolve to the first one
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//==============================================================================
// Count template
//==============================================================================

/// Identity of an output column
///
/// Widths and cell styles are keyed on this, so they only ever depend on
/// which column a cell is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Category,
    ItemCode,
    ItemName,
    Unit,
    OpeningQty,
    InboundQty,
    OutboundQty,
    ClosingQty,
    CountTotal,
    Location(u8),
}

impl ColumnKind {
    pub const DEFAULT_WIDTH: f64 = 14.0;

    /// The four renamed ledger quantities (number formatted, right aligned)
    pub fn is_quantity(self) -> bool {
        matches!(
            self,
            ColumnKind::OpeningQty
                | ColumnKind::InboundQty
                | ColumnKind::OutboundQty
                | ColumnKind::ClosingQty
        )
    }

    pub fn width(self) -> f64 {
        match self {
            ColumnKind::Category | ColumnKind::Unit => 12.0,
            ColumnKind::ItemCode => 15.0,
            ColumnKind::ItemName => 40.0,
            ColumnKind::CountTotal => 16.0,
            kind if kind.is_quantity() => 16.0,
            _ => Self::DEFAULT_WIDTH,
        }
    }
}

/// An output column: final header plus identity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One row of the count template, aligned with `TransformedTable::columns`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransformedRecord {
    pub values: Vec<CellValue>,
}

impl TransformedRecord {
    pub fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }
}

/// Normalized ledger, ready to be split into sheets
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransformedTable {
    pub columns: Vec<Column>,
    pub records: Vec<TransformedRecord>,
}

impl TransformedTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn kind_index(&self, kind: ColumnKind) -> Option<usize> {
        self.columns.iter().position(|c| c.kind == kind)
    }

    /// Value of a named column in one record
    pub fn value(&self, row: usize, name: &str) -> Option<&CellValue> {
        let col = self.column_index(name)?;
        self.records.get(row)?.get(col)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A named output sheet and the records routed to it, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySheet<'a> {
    pub name: &'static str,
    pub records: Vec<&'a TransformedRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values() {
        assert!(CellValue::Empty.is_missing());
        assert!(CellValue::Text(String::new()).is_missing());
        assert!(!CellValue::Text(" ".to_string()).is_missing());
        assert!(!CellValue::Int(0).is_missing());
        assert!(!CellValue::Number(0.0).is_missing());
        assert!(!CellValue::Bool(false).is_missing());
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Int(42).to_string(), "42");
        assert_eq!(CellValue::Number(1200.0).to_string(), "1200");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Text("EA".to_string()).to_string(), "EA");
        assert_eq!(CellValue::Bool(true).to_string(), "TRUE");
    }

    #[test]
    fn test_cell_serializes_untagged() {
        let row = vec![
            CellValue::Text("A1".to_string()),
            CellValue::Int(0),
            CellValue::Number(2.5),
            CellValue::Empty,
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"["A1",0,2.5,null]"#);
    }

    #[test]
    fn test_raw_table_first_duplicate_wins() {
        let table = RawTable::new(vec![
            "품목코드".to_string(),
            "단위".to_string(),
            "품목코드".to_string(),
        ]);
        assert_eq!(table.column_index("품목코드"), Some(0));
        assert_eq!(table.column_index("단위"), Some(1));
        assert_eq!(table.column_index("품목명"), None);
    }

    #[test]
    fn test_column_kind_widths() {
        assert_eq!(ColumnKind::Category.width(), 12.0);
        assert_eq!(ColumnKind::Unit.width(), 12.0);
        assert_eq!(ColumnKind::ItemCode.width(), 15.0);
        assert_eq!(ColumnKind::ItemName.width(), 40.0);
        assert_eq!(ColumnKind::OpeningQty.width(), 16.0);
        assert_eq!(ColumnKind::ClosingQty.width(), 16.0);
        assert_eq!(ColumnKind::CountTotal.width(), 16.0);
        assert_eq!(ColumnKind::Location(2).width(), 14.0);
    }

    #[test]
    fn test_count_total_is_not_a_quantity() {
        // Same width as the quantities, but no number format
        assert!(!ColumnKind::CountTotal.is_quantity());
        assert!(ColumnKind::InboundQty.is_quantity());
    }
}
