//! Fixture helpers shared by the integration tests. Not every test crate uses
//! every helper.
#![allow(dead_code)]

use std::path::Path;

use dabiao_tools::model::Cell;
use rust_xlsxwriter::Workbook;

/// Writes `rows` into the first worksheet of a new workbook at `path`.
pub fn write_rows(path: &Path, rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
            match cell {
                Cell::Empty => {}
                Cell::Number(value) => {
                    worksheet
                        .write_number(row_idx, col_idx, *value)
                        .expect("number written");
                }
                Cell::Text(value) => {
                    worksheet
                        .write_string(row_idx, col_idx, value)
                        .expect("string written");
                }
            }
        }
    }
    workbook.save(path).expect("fixture saved");
}

pub fn text(value: &str) -> Cell {
    Cell::text(value)
}

pub fn num(value: f64) -> Cell {
    Cell::Number(value)
}

/// Writes an order sheet with a banner, a header naming `items`, the price and
/// stock lines, and then one row per buyer.
pub fn write_order_sheet(path: &Path, items: &[&str], buyers: &[Vec<Cell>]) {
    let mut header = vec![text("金额"), text("cn")];
    header.extend(items.iter().map(|item| text(item)));

    let mut price = vec![text("price"), Cell::Empty];
    price.extend(items.iter().map(|_| num(5.0)));

    let mut stock = vec![text("stock"), Cell::Empty];
    stock.extend(items.iter().map(|_| num(10.0)));

    let mut rows = vec![vec![text("order form")], header, price, stock];
    rows.extend(buyers.iter().cloned());
    write_rows(path, &rows);
}
