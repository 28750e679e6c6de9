//! Aggregation queries over a ledger slice
//!
//! Pure, total functions: an empty slice yields an empty result, never an
//! error. Both sums use the raw unit `amount`, not `amount * quantity`; the
//! expense statement is the only consumer that multiplies by quantity.

use std::collections::BTreeMap;

use crate::models::{ExpenseRecord, Money};

/// Sum of `amount` per category, descending by sum
///
/// Ties keep category-name order, so output is deterministic.
pub fn totals_by_category(slice: &[ExpenseRecord]) -> Vec<(String, Money)> {
    let mut sums: BTreeMap<&str, Money> = BTreeMap::new();
    for record in slice {
        *sums.entry(record.category.as_str()).or_default() += record.amount;
    }

    let mut totals: Vec<(String, Money)> = sums
        .into_iter()
        .map(|(category, sum)| (category.to_string(), sum))
        .collect();
    // stable sort preserves the name ordering for equal sums
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Sum of `amount` per date, ascending by date
///
/// Dates are the stored ISO-like strings, so lexicographic order is
/// chronological order.
pub fn totals_by_date(slice: &[ExpenseRecord]) -> Vec<(String, Money)> {
    let mut sums: BTreeMap<&str, Money> = BTreeMap::new();
    for record in slice {
        *sums.entry(record.date.as_str()).or_default() += record.amount;
    }

    sums.into_iter()
        .map(|(date, sum)| (date.to_string(), sum))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseDraft;

    fn record(category: &str, date: &str, amount: i64, quantity: u32) -> ExpenseRecord {
        ExpenseDraft::new("워크숍", category, date, Money::from_units(amount))
            .with_quantity(quantity)
            .into_record(1)
    }

    #[test]
    fn test_totals_by_category_descending() {
        let slice = vec![
            record("식비", "2025-03-01", 10000, 1),
            record("교통", "2025-03-01", 30000, 1),
            record("식비", "2025-03-02", 5000, 1),
        ];

        let totals = totals_by_category(&slice);
        assert_eq!(
            totals,
            vec![
                ("교통".to_string(), Money::from_units(30000)),
                ("식비".to_string(), Money::from_units(15000)),
            ]
        );
    }

    #[test]
    fn test_totals_use_raw_amount_not_line_total() {
        // quantity is ignored by aggregation on purpose
        let slice = vec![record("식비", "2025-03-01", 10000, 3)];
        let totals = totals_by_category(&slice);
        assert_eq!(totals[0].1, Money::from_units(10000));
    }

    #[test]
    fn test_category_totals_sum_matches_slice_sum() {
        let slice = vec![
            record("식비", "2025-03-01", 1200, 1),
            record("교통", "2025-03-02", 800, 2),
            record("쇼핑", "2025-03-02", 9999, 1),
        ];
        let by_category: Money = totals_by_category(&slice).into_iter().map(|(_, m)| m).sum();
        let direct: Money = slice.iter().map(|r| r.amount).sum();
        assert_eq!(by_category, direct);
    }

    #[test]
    fn test_totals_by_date_ascending() {
        let slice = vec![
            record("식비", "2025-03-05", 1000, 1),
            record("식비", "2025-03-01", 2000, 1),
            record("교통", "2025-03-05", 3000, 1),
        ];

        let totals = totals_by_date(&slice);
        assert_eq!(
            totals,
            vec![
                ("2025-03-01".to_string(), Money::from_units(2000)),
                ("2025-03-05".to_string(), Money::from_units(4000)),
            ]
        );
    }

    #[test]
    fn test_empty_slice_yields_empty_results() {
        assert!(totals_by_category(&[]).is_empty());
        assert!(totals_by_date(&[]).is_empty());
    }
}
