//! Budget review
//!
//! Compares spend in a ledger slice to the configured ceilings: the overall
//! total and one line per registered category. Sums use the raw `amount`,
//! matching the aggregation engine (not the statement's `amount * quantity`).

use crate::models::{ExpenseRecord, Money};
use crate::registry::{BudgetConfig, CategoryRegistry};

/// Spend versus ceiling for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpend {
    pub category: String,
    pub spent: Money,
    /// Configured ceiling; zero when unconfigured
    pub ceiling: Money,
    /// True only when a positive ceiling is configured and exceeded
    pub over_budget: bool,
}

/// Overall budget review for a slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetReview {
    pub total_spent: Money,
    pub total_ceiling: Money,
    pub over_total: bool,
    /// One entry per registered category, in registry order
    pub categories: Vec<CategorySpend>,
}

impl BudgetReview {
    /// Review a slice against the budget configuration
    pub fn generate(
        slice: &[ExpenseRecord],
        budget: &BudgetConfig,
        categories: &CategoryRegistry,
    ) -> Self {
        let total_spent: Money = slice.iter().map(|r| r.amount).sum();
        let total_ceiling = budget.total_ceiling();

        let category_lines = categories
            .names()
            .iter()
            .map(|category| {
                let spent: Money = slice
                    .iter()
                    .filter(|r| &r.category == category)
                    .map(|r| r.amount)
                    .sum();
                let ceiling = budget.ceiling(category);
                CategorySpend {
                    category: category.clone(),
                    spent,
                    ceiling,
                    over_budget: BudgetConfig::exceeds(spent, ceiling),
                }
            })
            .collect();

        Self {
            total_spent,
            total_ceiling,
            over_total: BudgetConfig::exceeds(total_spent, total_ceiling),
            categories: category_lines,
        }
    }
}
