//! Merging several order sheets into one billing sheet.
//!
//! ```text
//! file A: A001 10.00 Alice*1          merged: A001 25.00 Alice*1,Bob*2
//! file B: A001 15.00 Bob*2      →             B002  8.00 Carol*1
//!         B002  8.00 Carol*1
//! ```
//!
//! Rows are grouped by key in ascending key order. Postage is allocated once
//! over the merged rows rather than per file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::dabiao::tools::config::SheetLayout;
use crate::dabiao::tools::model::{Amount, BillingRow, BillingSheet};
use crate::dabiao::tools::transform::summarize::PRODUCT_SEPARATOR;
use crate::dabiao::tools::transform::{allocate_postage, transform_file};

/// A file that could not contribute to a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Result of a merge: the merged sheet plus the files that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub sheet: BillingSheet,
    pub failures: Vec<FileFailure>,
}

/// Transforms every input file, groups the rows by key and allocates postage
/// over the result. A file that fails is skipped and reported; it never aborts
/// the merge.
pub fn merge_files(
    paths: &[PathBuf],
    series_name: &str,
    postage: Decimal,
    layout: &SheetLayout,
) -> MergeOutcome {
    let mut rows = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        match transform_file(path, series_name, "", layout) {
            Ok(sheet) => {
                debug!(path = %path.display(), rows = sheet.rows.len(), "file transformed");
                rows.extend(sheet.rows);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping file");
                failures.push(failure(path, error.to_string()));
            }
        }
    }

    let grouped = group_by_key(rows);
    info!(
        files = paths.len(),
        skipped = failures.len(),
        keys = grouped.len(),
        "merged order sheets"
    );

    let sheet = allocate_postage(BillingSheet::new(series_name, grouped), postage);
    MergeOutcome { sheet, failures }
}

/// Collapses rows sharing a key. Keys are compared with surrounding whitespace
/// removed. Amounts are summed; products are joined in encounter order. Rows
/// without a key cannot be grouped and are dropped.
pub fn group_by_key(rows: impl IntoIterator<Item = BillingRow>) -> Vec<BillingRow> {
    let mut groups: BTreeMap<String, KeyGroup> = BTreeMap::new();

    for row in rows {
        if !row.has_key() {
            continue;
        }
        groups
            .entry(row.key.trim().to_string())
            .or_default()
            .add(row);
    }

    groups
        .into_iter()
        .map(|(key, group)| group.build(key))
        .collect()
}

#[derive(Default)]
struct KeyGroup {
    total: Option<Decimal>,
    fallback: Option<Amount>,
    products: Vec<String>,
}

impl KeyGroup {
    fn add(&mut self, row: BillingRow) {
        match row.amount {
            Amount::Value(value) => {
                self.total = Some(self.total.unwrap_or(Decimal::ZERO) + value);
            }
            other @ Amount::Text(_) => {
                self.fallback.get_or_insert(other);
            }
            Amount::Blank => {}
        }
        if !row.product.is_empty() {
            self.products.push(row.product);
        }
    }

    fn build(self, key: String) -> BillingRow {
        let amount = match self.total {
            Some(total) => Amount::Value(total),
            None => self.fallback.unwrap_or(Amount::Blank),
        };
        BillingRow {
            amount,
            key,
            product: self.products.join(PRODUCT_SEPARATOR),
        }
    }
}

fn failure(path: &Path, message: String) -> FileFailure {
    FileFailure {
        path: path.to_path_buf(),
        message,
    }
}
