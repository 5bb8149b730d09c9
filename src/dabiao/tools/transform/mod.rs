//! Order sheet → billing sheet transformation steps.
//!
//! Each step is a pure function over [`Table`]/[`BillingSheet`]; the
//! composition lives in [`build_billing_sheet`].

pub mod annotate;
pub mod extract;
pub mod load;
pub mod postage;
pub mod relabel;
pub mod summarize;

use std::path::Path;

use tracing::debug;

use crate::dabiao::tools::config::SheetLayout;
use crate::dabiao::tools::error::Result;
use crate::dabiao::tools::io::excel_read;
use crate::dabiao::tools::model::{BillingSheet, RawTable, Table};

pub use annotate::annotate_cells;
pub use extract::extract_rows;
pub use load::promote_header;
pub use postage::{allocate_postage, round_up_cents};
pub use relabel::relabel_columns;
pub use summarize::summarize_products;

/// Runs header promotion, relabeling, annotation, summarizing and extraction
/// over a raw table. Postage is not applied.
pub fn build_billing_sheet(
    raw: RawTable,
    series_name: &str,
    suffix: &str,
    layout: &SheetLayout,
) -> Result<BillingSheet> {
    let table = promote_header(raw)?;
    debug!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "header promoted"
    );

    let table = Table {
        columns: relabel_columns(&table.columns, suffix),
        rows: table.rows,
    };
    let annotated = annotate_cells(&table, layout);
    let table = summarize_products(&table, &annotated, layout);
    extract_rows(&table, series_name, suffix, layout)
}

/// Reads the order sheet at `path` and turns it into a billing sheet.
pub fn transform_file(
    path: &Path,
    series_name: &str,
    suffix: &str,
    layout: &SheetLayout,
) -> Result<BillingSheet> {
    let raw = excel_read::read_raw_table(path)?;
    build_billing_sheet(raw, series_name, suffix, layout)
}
