use std::fmt;

use rust_decimal::Decimal;

/// Output label of the amount column.
pub const AMOUNT_COLUMN: &str = "金额";
/// Output label of the key column used for grouping.
pub const KEY_COLUMN: &str = "cn";
/// Label of the synthesized product description column.
pub const PRODUCT_COLUMN: &str = "制品";
/// Index of the first item (quantity) column. Columns before it hold the
/// amount and the key.
pub const FIRST_ITEM_COLUMN: usize = 2;
/// Significant digits a spreadsheet shows for a number.
const SIGNIFICANT_DIGITS: usize = 15;

/// A single spreadsheet cell as seen by the transformation pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Blank cell.
    #[default]
    Empty,
    /// Numeric cell. Integers read from the workbook are widened to `f64`.
    Number(f64),
    /// Textual cell. Booleans, dates and error values carry their display form.
    Text(String),
}

impl Cell {
    /// Builds a text cell, mapping the empty string to [`Cell::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(value) => f.write_str(value),
        }
    }
}

/// Rows × columns exactly as read from the first worksheet, before any header
/// handling. Row 0 is decorative and row 1 holds the column labels.
pub type RawTable = Vec<Vec<Cell>>;

/// A table whose header row has been promoted to column labels.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Returns the cell at the given position, treating out of range
    /// positions as blank.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(EMPTY)
    }
}

/// Content of the amount column of a billing row.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    /// Numeric amount taking part in postage and merge arithmetic.
    Value(Decimal),
    /// Non-numeric content, carried through untouched.
    Text(String),
    Blank,
}

impl Amount {
    /// Converts a sheet cell into an amount. Numbers are cut to the 15
    /// significant digits a spreadsheet displays, so `12.3` becomes exactly
    /// `12.3` and a formula result of `1.1 * 3` becomes `3.3`.
    pub fn from_cell(cell: &Cell) -> Self {
        match cell {
            Cell::Empty => Amount::Blank,
            Cell::Number(value) => match decimal_from_f64(*value) {
                Some(decimal) => Amount::Value(decimal),
                None => Amount::Text(value.to_string()),
            },
            Cell::Text(value) if value.is_empty() => Amount::Blank,
            Cell::Text(value) => Amount::Text(value.clone()),
        }
    }
}

fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some(Decimal::ZERO);
    }
    let rendered = format!("{value:.precision$e}", precision = SIGNIFICANT_DIGITS - 1);
    Decimal::from_scientific(&rendered)
        .ok()
        .map(|decimal| decimal.normalize())
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Value(value)
    }
}

/// One line of a billing sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingRow {
    pub amount: Amount,
    /// Grouping identity. An empty string means the row has no key.
    pub key: String,
    /// Comma separated description of the items on this row.
    pub product: String,
}

impl BillingRow {
    pub fn new(amount: impl Into<Amount>, key: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            key: key.into(),
            product: product.into(),
        }
    }

    pub fn has_key(&self) -> bool {
        !self.key.trim().is_empty()
    }
}

/// Synthetic first row of a billing sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TitleRow {
    /// Series name, followed by the item suffix when one was given.
    pub label: String,
    /// Postage summary, empty when no postage was allocated.
    pub summary: String,
}

/// The unit of output: a title row followed by billing rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BillingSheet {
    pub title: TitleRow,
    pub rows: Vec<BillingRow>,
}

impl BillingSheet {
    pub fn new(label: impl Into<String>, rows: Vec<BillingRow>) -> Self {
        Self {
            title: TitleRow {
                label: label.into(),
                summary: String::new(),
            },
            rows,
        }
    }

    /// Number of rows carrying a non-empty key.
    pub fn keyed_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.has_key()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_from_number_uses_shortest_form() {
        let amount = Amount::from_cell(&Cell::Number(12.3));
        assert_eq!(amount, Amount::Value(Decimal::new(123, 1)));
    }

    #[test]
    fn formula_noise_is_cut_to_spreadsheet_precision() {
        let amount = Amount::from_cell(&Cell::Number(1.1 * 3.0));
        assert_eq!(amount, Amount::Value(Decimal::new(33, 1)));
        let amount = Amount::from_cell(&Cell::Number(0.1 + 0.2));
        assert_eq!(amount, Amount::Value(Decimal::new(3, 1)));
        let amount = Amount::from_cell(&Cell::Number(-12.5));
        assert_eq!(amount, Amount::Value(Decimal::new(-125, 1)));
    }

    #[test]
    fn unrepresentable_numbers_stay_textual() {
        assert_eq!(
            Amount::from_cell(&Cell::Number(f64::INFINITY)),
            Amount::Text("inf".to_string())
        );
    }

    #[test]
    fn amount_from_text_and_blank() {
        assert_eq!(Amount::from_cell(&Cell::Empty), Amount::Blank);
        assert_eq!(
            Amount::from_cell(&Cell::text("free")),
            Amount::Text("free".to_string())
        );
    }

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Cell::Number(2.0).to_string(), "2");
        assert_eq!(Cell::Number(1.5).to_string(), "1.5");
    }

    #[test]
    fn keyed_rows_ignores_blank_keys() {
        let sheet = BillingSheet::new(
            "S",
            vec![
                BillingRow::new(Decimal::ONE, "A", ""),
                BillingRow::new(Decimal::ONE, "  ", ""),
                BillingRow::new(Amount::Blank, "B", ""),
            ],
        );
        assert_eq!(sheet.keyed_rows(), 2);
    }
}
