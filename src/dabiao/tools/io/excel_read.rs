use std::path::Path;

use calamine::{DataType, Range, Reader, open_workbook_auto};

use crate::dabiao::tools::error::{Result, ToolError};
use crate::dabiao::tools::model::{Amount, BillingRow, BillingSheet, Cell, RawTable, TitleRow};

/// Reads the first worksheet of the workbook at `path` into a raw table.
///
/// Rows and columns are anchored at `A1`: leading blank rows or columns that
/// the reader trims from the used range are restored as blank cells so that
/// positional conventions (row 1 is the header, column 0 is the amount) hold.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }

    let range = read_first_sheet(path)?;
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let (start_row, start_col) = (start_row as usize, start_col as usize);
    let width = start_col + range.width();

    let mut table: RawTable = vec![vec![Cell::Empty; width]; start_row];
    for row in range.rows() {
        let mut cells = Vec::with_capacity(width);
        cells.resize(start_col, Cell::Empty);
        cells.extend(row.iter().map(data_to_cell));
        table.push(cells);
    }

    Ok(table)
}

/// Reads back a billing sheet written by
/// [`write_billing_sheet`](crate::io::excel_write::write_billing_sheet).
///
/// Row 0 holds the column labels, row 1 the title row and the remaining rows
/// the billing rows.
pub fn read_billing_sheet(path: &Path) -> Result<BillingSheet> {
    let table = read_raw_table(path)?;
    if table.len() < 2 {
        return Err(ToolError::Format(format!(
            "billing sheet {} has no title row",
            path.display()
        )));
    }

    let text_at = |row: &[Cell], column: usize| -> String {
        row.get(column).map(Cell::to_string).unwrap_or_default()
    };

    let title_row = &table[1];
    let title = TitleRow {
        label: text_at(title_row, 0),
        summary: text_at(title_row, 1),
    };

    let rows = table
        .iter()
        .skip(2)
        .map(|row| BillingRow {
            amount: row.first().map(Amount::from_cell).unwrap_or(Amount::Blank),
            key: text_at(row, 1),
            product: text_at(row, 2),
        })
        .collect();

    Ok(BillingSheet { title, rows })
}

fn read_first_sheet(path: &Path) -> Result<Range<DataType>> {
    let mut workbook = open_workbook_auto(path)?;
    let range_result = workbook.worksheet_range_at(0).ok_or_else(|| {
        ToolError::Format(format!("workbook {} has no worksheet", path.display()))
    })?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn data_to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Empty,
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::String(value) => Cell::text(value.clone()),
        other => Cell::text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_cells_map_onto_pipeline_cells() {
        assert_eq!(data_to_cell(&DataType::Empty), Cell::Empty);
        assert_eq!(data_to_cell(&DataType::Int(3)), Cell::Number(3.0));
        assert_eq!(data_to_cell(&DataType::Float(1.5)), Cell::Number(1.5));
        assert_eq!(
            data_to_cell(&DataType::String(String::new())),
            Cell::Empty
        );
        assert_eq!(
            data_to_cell(&DataType::Bool(true)),
            Cell::Text("true".to_string())
        );
    }

    #[test]
    fn missing_file_is_reported_by_path() {
        let error = read_raw_table(Path::new("does/not/exist.xlsx")).unwrap_err();
        assert!(matches!(error, ToolError::MissingInput(_)));
    }
}
