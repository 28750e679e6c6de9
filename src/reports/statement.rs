//! Expense statement assembly
//!
//! Builds the printable execution statement from a ledger slice and a budget
//! total: one display row per record plus a trailing summary. The structure
//! is renderer-agnostic; the fixed column contract below is what a landscape
//! A4 layout consumes, and `display` renders the same rows as terminal text.

use serde::Serialize;

use crate::models::{ExpenseRecord, Money};

/// Column headers of the statement table, in render order
pub const COLUMN_HEADERS: [&str; 9] = [
    "ID", "일자", "분류", "내역/설명", "단가", "수량", "금액", "참여자", "비고",
];

/// Column widths in millimeters for a landscape A4 page; fixed contract
pub const COLUMN_WIDTHS_MM: [u32; 9] = [20, 27, 20, 90, 18, 12, 22, 21, 27];

/// Maximum rendered description length, in characters
pub const DESCRIPTION_LIMIT: usize = 35;

/// Currency glyph used in the summary line
pub const CURRENCY_SYMBOL: &str = "￦";

/// Default statement title
pub const DEFAULT_TITLE: &str = "예산 집행내역서";

/// Header metadata for a statement
#[derive(Debug, Clone, Serialize)]
pub struct StatementMeta {
    /// Report title, rendered centered in the page header
    pub title: String,
    /// Project/event name; empty when reporting across all projects
    pub project: String,
    /// Free-form activity period string, e.g. "2025-03-01 ~ 2025-03-05"
    pub period: String,
}

impl Default for StatementMeta {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            project: String::new(),
            period: String::new(),
        }
    }
}

impl StatementMeta {
    /// Metadata with a custom title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// One display row of the statement table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementRow {
    pub id: u64,
    pub date: String,
    pub category: String,
    /// Description truncated to [`DESCRIPTION_LIMIT`] characters
    pub description: String,
    /// Unit amount (rendered thousands-separated)
    pub unit_amount: Money,
    pub quantity: u32,
    /// `unit_amount * quantity` (rendered thousands-separated)
    pub line_total: Money,
    pub participant: String,
    pub note: String,
}

impl StatementRow {
    fn from_record(record: &ExpenseRecord) -> Self {
        Self {
            id: record.id,
            date: record.date.clone(),
            category: record.category.clone(),
            description: truncate_chars(&record.description, DESCRIPTION_LIMIT),
            unit_amount: record.amount,
            quantity: record.quantity,
            line_total: record.line_total(),
            participant: record.participant.clone(),
            note: record.note.clone(),
        }
    }
}

/// The assembled statement: rows plus summary
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseStatement {
    pub meta: StatementMeta,
    /// One row per record, slice order preserved
    pub rows: Vec<StatementRow>,
    /// Sum of `amount * quantity` over all rows
    pub total_spent: Money,
    /// `budget_total - total_spent` when a positive budget total is
    /// configured, otherwise zero
    pub balance: Money,
}

impl ExpenseStatement {
    /// Assemble a statement from a ledger slice and the configured budget
    /// total
    pub fn assemble(slice: &[ExpenseRecord], budget_total: Money, meta: StatementMeta) -> Self {
        let rows: Vec<StatementRow> = slice.iter().map(StatementRow::from_record).collect();
        let total_spent: Money = rows.iter().map(|r| r.line_total).sum();
        let balance = if budget_total.is_positive() {
            budget_total - total_spent
        } else {
            Money::zero()
        };

        Self {
            meta,
            rows,
            total_spent,
            balance,
        }
    }

    /// The trailing summary line, formatted the way the printed statement
    /// shows it
    pub fn summary_line(&self) -> String {
        format!(
            "집행 총계: {}    잔여 예산: {}",
            self.total_spent.format_with_symbol(CURRENCY_SYMBOL),
            self.balance.format_with_symbol(CURRENCY_SYMBOL)
        )
    }
}

/// Truncate to a character count (descriptions are Korean text, so byte
/// slicing would split a code point)
fn truncate_chars(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        s.to_string()
    } else {
        s.chars().take(limit).collect()
    }
}
