use crate::dabiao::tools::config::SheetLayout;
use crate::dabiao::tools::error::{Result, ToolError};
use crate::dabiao::tools::model::{Amount, BillingRow, BillingSheet, Table};

/// Number of leading columns that make up a billing row.
const BILLING_COLUMNS: usize = 3;

/// Slices amount, key and product out of the data rows of a summarized table
/// and puts a title row labelled `series_name + suffix` in front.
pub fn extract_rows(
    table: &Table,
    series_name: &str,
    suffix: &str,
    layout: &SheetLayout,
) -> Result<BillingSheet> {
    if table.columns.len() < BILLING_COLUMNS {
        return Err(ToolError::Format(format!(
            "expected at least {BILLING_COLUMNS} columns after summarizing, found {}",
            table.columns.len()
        )));
    }

    let rows = (layout.data_offset..table.rows.len())
        .map(|row_idx| BillingRow {
            amount: Amount::from_cell(table.cell(row_idx, 0)),
            key: table.cell(row_idx, 1).to_string(),
            product: table.cell(row_idx, 2).to_string(),
        })
        .collect();

    Ok(BillingSheet::new(format!("{series_name}{suffix}"), rows))
}
