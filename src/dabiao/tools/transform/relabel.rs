use crate::dabiao::tools::model::FIRST_ITEM_COLUMN;

/// Appends `suffix` to every item column label. The amount and key labels are
/// never touched.
pub fn relabel_columns(columns: &[String], suffix: &str) -> Vec<String> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            if idx >= FIRST_ITEM_COLUMN && !suffix.is_empty() {
                format!("{label}{suffix}")
            } else {
                label.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn suffix_applies_to_item_columns_only() {
        let relabeled = relabel_columns(&labels(&["amount", "cn", "Alice", "Bob"]), "badge");
        assert_eq!(relabeled, labels(&["amount", "cn", "Alicebadge", "Bobbadge"]));
    }

    #[test]
    fn empty_suffix_is_identity() {
        let columns = labels(&["amount", "cn", "Alice"]);
        assert_eq!(relabel_columns(&columns, ""), columns);
    }

    proptest! {
        #[test]
        fn leading_columns_survive_any_suffix(
            columns in prop::collection::vec("[a-z]{0,6}", 0..8),
            suffix in ".{0,4}"
        ) {
            let relabeled = relabel_columns(&columns, &suffix);
            prop_assert_eq!(relabeled.len(), columns.len());
            for idx in 0..columns.len().min(FIRST_ITEM_COLUMN) {
                prop_assert_eq!(&relabeled[idx], &columns[idx]);
            }
        }
    }
}
