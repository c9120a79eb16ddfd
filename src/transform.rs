//! Ledger → count template transform
//!
//! `normalize` turns the raw ledger into the count template columns;
//! `group_by_category` routes the resulting records to output sheets.

use crate::layout::{PeriodLabels, CATEGORY_GROUPS, PLACEHOLDER_FIELDS, SOURCE_FIELDS};
use crate::types::{
    CategorySheet, CellValue, Column, ColumnKind, RawTable, TransformedRecord, TransformedTable,
};
use tracing::{debug, warn};

/// Settings for one conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    pub period: PeriodLabels,
    /// Data rows dropped before projection. Ledger exports repeat the header
    /// (or a units line) as their first data row.
    pub skip_leading_rows: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            period: PeriodLabels::default(),
            skip_leading_rows: 1,
        }
    }
}

/// Project the ledger onto the count template
///
/// Ledger columns that are missing from the header are left out of the
/// output rather than treated as an error.
pub fn normalize(raw: &RawTable, options: &TransformOptions) -> TransformedTable {
    // (output column, index in the ledger)
    let kept: Vec<(Column, usize)> = SOURCE_FIELDS
        .iter()
        .filter_map(|field| {
            raw.column_index(field.header)
                .map(|idx| (Column::new(options.period.output_header(field), field.kind), idx))
        })
        .collect();

    if !kept.iter().any(|(c, _)| c.kind == ColumnKind::Category) {
        warn!("ledger has no category column; every sheet will be empty");
    }

    let mut columns: Vec<Column> = kept.iter().map(|(c, _)| c.clone()).collect();
    columns.extend(
        PLACEHOLDER_FIELDS
            .iter()
            .map(|(name, kind)| Column::new(*name, *kind)),
    );

    let skip = options.skip_leading_rows.min(raw.row_count());
    let records = raw
        .rows
        .iter()
        .skip(skip)
        .map(|row| {
            let mut values: Vec<CellValue> = kept
                .iter()
                .map(|(_, idx)| match row.get(*idx) {
                    Some(value) if !value.is_missing() => value.clone(),
                    _ => CellValue::Int(0),
                })
                .collect();
            values.extend(PLACEHOLDER_FIELDS.iter().map(|_| CellValue::Text(String::new())));
            TransformedRecord::new(values)
        })
        .collect::<Vec<_>>();

    debug!(
        skipped = skip,
        kept_columns = kept.len(),
        records = records.len(),
        "normalized ledger"
    );

    TransformedTable { columns, records }
}

/// Records split into output sheets
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSheets<'a> {
    /// Non-empty sheets in group declaration order
    pub sheets: Vec<CategorySheet<'a>>,
    /// Records whose category matched no group; they appear in no sheet
    pub unrouted: usize,
}

/// Route records to the fixed category groups
///
/// Groups with no matching record are omitted. Records outside every group
/// are dropped and only counted.
pub fn group_by_category(table: &TransformedTable) -> GroupedSheets<'_> {
    let category_idx = table.kind_index(ColumnKind::Category);

    let sheets: Vec<CategorySheet<'_>> = CATEGORY_GROUPS
        .iter()
        .map(|group| CategorySheet {
            name: group.sheet_name,
            records: table
                .records
                .iter()
                .filter(|r| category_of(r, category_idx).is_some_and(|c| group.matches(c)))
                .collect(),
        })
        .filter(|sheet| !sheet.records.is_empty())
        .collect();

    let unrouted = table
        .records
        .iter()
        .filter(|r| {
            !category_of(r, category_idx)
                .is_some_and(|c| CATEGORY_GROUPS.iter().any(|g| g.matches(c)))
        })
        .count();

    if unrouted > 0 {
        warn!(
            unrouted,
            "records with an unknown category were left out of every sheet"
        );
    }

    GroupedSheets { sheets, unrouted }
}

/// Category label of a record; zero-filled or non-text categories have none
fn category_of(record: &TransformedRecord, category_idx: Option<usize>) -> Option<&str> {
    category_idx
        .and_then(|idx| record.get(idx))
        .and_then(CellValue::as_text)
}

/// First `rows` records of the template
pub fn preview(table: &TransformedTable, rows: usize) -> &[TransformedRecord] {
    &table.records[..rows.min(table.records.len())]
}
