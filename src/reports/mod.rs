//! Reports module for splitbook
//!
//! Derived, read-only computations over a ledger slice: category/date
//! aggregation, dutch-pay settlement, budget review, and the printable
//! expense statement.

pub mod aggregate;
pub mod budget;
pub mod settlement;
pub mod statement;

pub use aggregate::{totals_by_category, totals_by_date};
pub use budget::{BudgetReview, CategorySpend};
pub use settlement::{Settlement, SettlementLine};
pub use statement::{
    ExpenseStatement, StatementMeta, StatementRow, COLUMN_HEADERS, COLUMN_WIDTHS_MM,
    CURRENCY_SYMBOL, DEFAULT_TITLE, DESCRIPTION_LIMIT,
};
