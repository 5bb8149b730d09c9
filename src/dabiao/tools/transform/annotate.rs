use crate::dabiao::tools::config::SheetLayout;
use crate::dabiao::tools::model::{Cell, FIRST_ITEM_COLUMN, Table};

/// Rewrites every positive item quantity in the data rows as
/// `"<label><separator><quantity>"`. Other cells are copied unchanged.
pub fn annotate_cells(table: &Table, layout: &SheetLayout) -> Table {
    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            if row_idx < layout.data_offset {
                return row.clone();
            }
            row.iter()
                .enumerate()
                .map(|(col_idx, cell)| {
                    if col_idx < FIRST_ITEM_COLUMN {
                        return cell.clone();
                    }
                    let label = table.columns.get(col_idx).map(String::as_str).unwrap_or("");
                    annotate_cell(label, cell, &layout.separator)
                })
                .collect()
        })
        .collect();

    Table {
        columns: table.columns.clone(),
        rows,
    }
}

fn annotate_cell(label: &str, cell: &Cell, separator: &str) -> Cell {
    match cell {
        Cell::Number(quantity) if *quantity > 0.0 => {
            Cell::Text(format!("{label}{separator}{cell}"))
        }
        other => other.clone(),
    }
}
