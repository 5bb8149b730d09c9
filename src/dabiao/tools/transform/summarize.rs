use crate::dabiao::tools::config::SheetLayout;
use crate::dabiao::tools::model::{Cell, FIRST_ITEM_COLUMN, PRODUCT_COLUMN, Table};

/// Separator between the item entries of a product description.
pub const PRODUCT_SEPARATOR: &str = ",";

/// Inserts the product description column at index 2.
///
/// `source` is the table before annotation and `annotated` the table
/// [`annotate_cells`](super::annotate_cells) produced from it. Data rows get
/// their annotated item cells joined in column order; rows before the data
/// offset get a blank cell. The item columns shift one to the right.
pub fn summarize_products(source: &Table, annotated: &Table, layout: &SheetLayout) -> Table {
    let insert_at = FIRST_ITEM_COLUMN.min(annotated.columns.len());

    let mut columns = annotated.columns.clone();
    columns.insert(insert_at, PRODUCT_COLUMN.to_string());

    let rows = annotated
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let product = if row_idx < layout.data_offset {
                Cell::Empty
            } else {
                let before = source.rows.get(row_idx).map(Vec::as_slice).unwrap_or(&[]);
                Cell::text(describe_items(before, row))
            };
            let mut cells = row.clone();
            cells.insert(insert_at.min(cells.len()), product);
            cells
        })
        .collect();

    Table { columns, rows }
}

/// Joins the item cells that annotation rewrote: positive quantities in
/// `before` that became text in `after`. Text typed into an item column by hand
/// is not an item and is left out.
pub fn describe_items(before: &[Cell], after: &[Cell]) -> String {
    after
        .iter()
        .enumerate()
        .skip(FIRST_ITEM_COLUMN)
        .filter_map(|(col_idx, cell)| match (before.get(col_idx), cell) {
            (Some(Cell::Number(quantity)), Cell::Text(text)) if *quantity > 0.0 => {
                Some(text.as_str())
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(PRODUCT_SEPARATOR)
}
