//! Terminal rendering for reports
//!
//! Plain-text renditions of the statement, settlement, totals, and budget
//! review. The statement's page layout (landscape A4, millimeter column
//! widths) belongs to a document renderer outside this crate; here the same
//! rows are laid out as delimited text for the terminal.

use crate::models::Money;
use crate::reports::{
    BudgetReview, ExpenseStatement, Settlement, COLUMN_HEADERS, CURRENCY_SYMBOL,
};

/// Render the expense statement as a text table
pub fn format_statement(statement: &ExpenseStatement) -> String {
    let mut out = String::new();
    out.push_str(&statement.meta.title);
    out.push('\n');
    if !statement.meta.project.is_empty() {
        out.push_str(&format!("프로젝트/행사명 : {}\n", statement.meta.project));
    }
    if !statement.meta.period.is_empty() {
        out.push_str(&format!("활동 기간 : {}\n", statement.meta.period));
    }
    out.push('\n');

    out.push_str(&COLUMN_HEADERS.join(" | "));
    out.push('\n');
    out.push_str(&separator(72));
    out.push('\n');

    for row in &statement.rows {
        out.push_str(&format!(
            "{} | {} | {} | {} | {} | {} | {} | {} | {}\n",
            row.id,
            row.date,
            row.category,
            row.description,
            row.unit_amount.format_grouped(),
            row.quantity,
            row.line_total.format_grouped(),
            row.participant,
            row.note
        ));
    }

    out.push_str(&separator(72));
    out.push('\n');
    out.push_str(&statement.summary_line());
    out.push('\n');
    out
}

/// Render the settlement result
pub fn format_settlement(settlement: &Settlement) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "총 지출액: {}\n",
        settlement.total.format_with_symbol(CURRENCY_SYMBOL)
    ));
    out.push_str(&format!("참여자 수: {}\n", settlement.participants.len()));
    out.push_str(&format!(
        "1인당 평균 부담금: {}\n",
        Money::from_units(settlement.per_person_share.round() as i64)
            .format_with_symbol(CURRENCY_SYMBOL)
    ));

    if settlement.lines.is_empty() {
        out.push_str("정산할 내역이 없습니다.\n");
        return out;
    }

    out.push_str(&separator(48));
    out.push('\n');
    for line in &settlement.lines {
        let participant = if line.participant.is_empty() {
            "(이름 없음)"
        } else {
            &line.participant
        };
        out.push_str(&format!(
            "{}: 지출 {} / 정산 {}\n",
            participant,
            line.spent.format_grouped(),
            line.balance.format_grouped()
        ));
    }
    out.push_str("양수: 추가 부담, 음수: 환급\n");
    out
}

/// Render aggregation totals (category or date) as label/amount lines
pub fn format_totals(totals: &[(String, Money)], heading: &str) -> String {
    let mut out = String::new();
    out.push_str(heading);
    out.push('\n');
    if totals.is_empty() {
        out.push_str("등록된 경비가 없습니다.\n");
        return out;
    }
    for (label, sum) in totals {
        out.push_str(&format!("{}: {}\n", label, sum.format_grouped()));
    }
    out
}

/// Render the budget review with over-budget markers
pub fn format_budget_review(review: &BudgetReview) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "총 지출: {} / 총 예산: {}{}\n",
        review.total_spent.format_grouped(),
        review.total_ceiling.format_grouped(),
        if review.over_total { "  ⚠ 총 예산 초과!" } else { "" }
    ));
    for line in &review.categories {
        out.push_str(&format!(
            "• {} 지출: {} / 예산: {}{}\n",
            line.category,
            line.spent.format_grouped(),
            line.ceiling.format_grouped(),
            if line.over_budget { "  ⚠ 예산 초과!" } else { "" }
        ));
    }
    out
}

/// Format a separator line
fn separator(width: usize) -> String {
    "─".repeat(width)
}
