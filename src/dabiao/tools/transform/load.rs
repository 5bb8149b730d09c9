use crate::dabiao::tools::error::{Result, ToolError};
use crate::dabiao::tools::model::{Cell, RawTable, Table};

/// Row of the raw sheet that holds the column labels.
pub const HEADER_ROW: usize = 1;

/// Promotes row 1 of the raw table to column labels and removes it from the
/// body. Ragged rows are padded with blank cells to the widest row.
pub fn promote_header(raw: RawTable) -> Result<Table> {
    if raw.len() <= HEADER_ROW {
        return Err(ToolError::Format(format!(
            "expected at least {} rows, found {}",
            HEADER_ROW + 1,
            raw.len()
        )));
    }

    let width = raw.iter().map(Vec::len).max().unwrap_or(0);
    let mut rows = raw;
    let header = rows.remove(HEADER_ROW);

    let mut columns: Vec<String> = header.iter().map(Cell::to_string).collect();
    columns.resize(width, String::new());

    for row in &mut rows {
        row.resize(width, Cell::Empty);
    }

    Ok(Table { columns, rows })
}
