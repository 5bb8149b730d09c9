use rust_decimal::{Decimal, RoundingStrategy};

use crate::dabiao::tools::model::{Amount, BillingSheet};

/// Decimal places kept for currency values.
const CENTS: u32 = 2;

/// Rounds to two decimal places, away from zero, and always carries two
/// decimal places so that `25` renders as `25.00`.
pub fn round_up_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(CENTS, RoundingStrategy::AwayFromZero);
    rounded.rescale(CENTS);
    rounded
}

/// Per-entry share of `fee` over `entries` keyed rows, or `None` when there
/// is nothing to allocate.
pub fn postage_share(fee: Decimal, entries: usize) -> Option<Decimal> {
    if fee <= Decimal::ZERO || entries == 0 {
        return None;
    }
    Some(round_up_cents(fee / Decimal::from(entries)))
}

/// Human readable summary stored in the title row, e.g. `邮100，33.34/人`.
pub fn postage_summary(fee: Decimal, share: Decimal) -> String {
    format!("邮{}，{}/人", fee.normalize(), share)
}

/// Splits `fee` evenly across the rows that carry a key and adds the share to
/// every numeric amount.
pub fn allocate_postage(mut sheet: BillingSheet, fee: Decimal) -> BillingSheet {
    let entries = sheet.keyed_rows();
    let Some(share) = postage_share(fee, entries) else {
        return sheet;
    };

    tracing::debug!(%fee, %share, entries, "allocating postage");
    sheet.title.summary = postage_summary(fee, share);
    for row in &mut sheet.rows {
        if let Amount::Value(amount) = row.amount {
            row.amount = Amount::Value(round_up_cents(amount + share));
        }
    }
    sheet
}
