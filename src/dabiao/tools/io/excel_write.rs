use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dabiao::tools::error::Result;
use crate::dabiao::tools::model::{AMOUNT_COLUMN, Amount, BillingSheet, KEY_COLUMN, PRODUCT_COLUMN};

const PRODUCT_COLUMN_WIDTH: f64 = 60.0;

/// Writes the billing sheet to `path` as a single-worksheet workbook.
///
/// Layout: column labels on row 0, the title row on row 1, billing rows from
/// row 2 on. Numeric amounts are stored as numbers.
pub fn write_billing_sheet(path: &Path, sheet: &BillingSheet) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, header) in [AMOUNT_COLUMN, KEY_COLUMN, PRODUCT_COLUMN].iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    write_text(worksheet, 1, 0, &sheet.title.label)?;
    write_text(worksheet, 1, 1, &sheet.title.summary)?;

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let excel_row = (row_idx + 2) as u32;
        match &row.amount {
            Amount::Value(value) => {
                // Amounts outside f64 range cannot come out of a spreadsheet.
                if let Some(number) = value.to_f64() {
                    worksheet.write_number(excel_row, 0, number)?;
                }
            }
            Amount::Text(text) => write_text(worksheet, excel_row, 0, text)?,
            Amount::Blank => {}
        }
        write_text(worksheet, excel_row, 1, &row.key)?;
        write_text(worksheet, excel_row, 2, &row.product)?;
    }

    worksheet.set_column_width(2, PRODUCT_COLUMN_WIDTH)?;

    workbook.save(path)?;
    Ok(())
}

fn write_text(worksheet: &mut Worksheet, row: u32, col: u16, text: &str) -> Result<()> {
    if !text.is_empty() {
        worksheet.write_string(row, col, text)?;
    }
    Ok(())
}
