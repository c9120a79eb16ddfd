//! Ledger fixtures shared by the integration tests
//!
//! Ledgers are generated with rust_xlsxwriter on the fly. The one legacy
//! BIFF8 ledger lives in `tests/fixtures/ledger.xls`.

#![allow(dead_code)]

use calamine::{Data, Range, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;
use std::path::Path;

/// A fixture cell
#[derive(Clone, Copy)]
pub enum Cell<'a> {
    S(&'a str),
    N(f64),
    Blank,
}

pub const LEDGER_HEADERS: [&str; 10] = [
    "품목계정그룹",
    "품목코드",
    "품목명",
    "규격",
    "단위",
    "기초재고",
    "입고계",
    "출고계",
    "기말재고",
    "비고",
];

/// Units line that ledger exports repeat under the header
pub fn remnant_row() -> Vec<Cell<'static>> {
    LEDGER_HEADERS.iter().map(|h| Cell::S(*h)).collect()
}

/// One ledger line in `LEDGER_HEADERS` order
pub fn item<'a>(
    category: &'a str,
    code: &'a str,
    name: &'a str,
    opening: Cell<'a>,
    inbound: f64,
    outbound: f64,
    closing: f64,
) -> Vec<Cell<'a>> {
    vec![
        Cell::S(category),
        Cell::S(code),
        Cell::S(name),
        Cell::S("-"),
        Cell::S("EA"),
        opening,
        Cell::N(inbound),
        Cell::N(outbound),
        Cell::N(closing),
        Cell::S("memo"),
    ]
}

fn build(headers: &[&str], rows: &[Vec<Cell<'_>>]) -> Workbook {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            let (row_num, col_num) = ((r + 1) as u32, col as u16);
            match cell {
                Cell::S(s) => {
                    sheet.write_string(row_num, col_num, *s).unwrap();
                }
                Cell::N(n) => {
                    sheet.write_number(row_num, col_num, *n).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }
    workbook
}

pub fn ledger_bytes(headers: &[&str], rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
    build(headers, rows).save_to_buffer().unwrap()
}

pub fn write_ledger(path: &Path, headers: &[&str], rows: &[Vec<Cell<'_>>]) {
    build(headers, rows).save(path).unwrap();
}

/// Open a generated workbook for inspection
pub fn open_output(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
    Xlsx::new(Cursor::new(bytes)).unwrap()
}

pub fn sheet(workbook: &mut Xlsx<Cursor<Vec<u8>>>, name: &str) -> Range<Data> {
    workbook.worksheet_range(name).unwrap()
}

/// Text of every header cell in row 1
pub fn header_row(range: &Range<Data>) -> Vec<String> {
    range
        .rows()
        .next()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default()
}
