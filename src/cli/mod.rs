//! CLI command handlers
//!
//! Bridges clap argument parsing with the library. Each invocation is one
//! session: the ledger CSV is loaded into an [`AppState`], the requested
//! computation runs, and results go to stdout (or back out as CSV). The
//! interchange CSV doubles as the session's persistence, since the ledger
//! itself is in-memory per process.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::auth::AdminGate;
use crate::display;
use crate::error::{LedgerError, LedgerResult};
use crate::export::export_csv;
use crate::ledger::filter_by_date_range;
use crate::models::{ExpenseRecord, DATE_FORMAT};
use crate::receipt::scan_receipt_text;
use crate::registry::BudgetConfig;
use crate::reports::{
    totals_by_category, totals_by_date, BudgetReview, ExpenseStatement, Settlement,
    StatementMeta, DEFAULT_TITLE,
};
use crate::state::AppState;

/// Which aggregation a `totals` invocation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TotalsBy {
    Category,
    Date,
}

/// Which import path a `import` invocation takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportMode {
    /// Additive bulk registration (subset of columns, ids reassigned)
    Bulk,
    /// Full replacement (all ten columns required)
    Replace,
}

/// Load a session state from a ledger CSV, or an empty one when no path is
/// given
pub fn load_state(ledger: Option<&Path>) -> LedgerResult<AppState> {
    let mut state = AppState::new();
    if let Some(path) = ledger {
        let input = fs::read_to_string(path)?;
        state.replace_import(&input)?;
    }
    Ok(state)
}

/// Load a budget configuration from a JSON file
/// (`{"total": 100000, "식비": 30000}`)
pub fn load_budget(path: &Path) -> LedgerResult<BudgetConfig> {
    let input = fs::read_to_string(path)?;
    let budget: BudgetConfig = serde_json::from_str(&input)?;
    Ok(budget)
}

fn parse_date_arg(raw: &str, flag: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        LedgerError::Validation(format!("--{} '{}' is not in YYYY-MM-DD form", flag, raw))
    })
}

/// Project filter plus optional inclusive date range
fn slice_for(
    state: &AppState,
    project: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> LedgerResult<Vec<ExpenseRecord>> {
    let slice = state.ledger.filter_by_project(project);
    match (from, to) {
        (Some(from), Some(to)) => {
            let start = parse_date_arg(from, "from")?;
            let end = parse_date_arg(to, "to")?;
            Ok(filter_by_date_range(&slice, start, end))
        }
        (None, None) => Ok(slice),
        _ => Err(LedgerError::Validation(
            "--from and --to must be given together".into(),
        )),
    }
}

/// `report`: assemble and print the expense statement
#[allow(clippy::too_many_arguments)]
pub fn handle_report(
    ledger: &Path,
    project: &str,
    title: Option<&str>,
    period: Option<&str>,
    budget: Option<&Path>,
    from: Option<&str>,
    to: Option<&str>,
) -> LedgerResult<()> {
    let state = load_state(Some(ledger))?;
    let slice = slice_for(&state, project, from, to)?;

    let budget_total = match budget {
        Some(path) => load_budget(path)?.total_ceiling(),
        None => state.budget.total_ceiling(),
    };

    let meta = StatementMeta {
        title: title.unwrap_or(DEFAULT_TITLE).to_string(),
        project: if project == crate::registry::ALL_PROJECTS {
            String::new()
        } else {
            project.to_string()
        },
        period: period.unwrap_or_default().to_string(),
    };

    let statement = ExpenseStatement::assemble(&slice, budget_total, meta);
    print!("{}", display::format_statement(&statement));
    Ok(())
}

/// `settle`: dutch-pay settlement for the selected project
pub fn handle_settle(ledger: &Path, project: &str) -> LedgerResult<()> {
    let state = load_state(Some(ledger))?;
    let slice = state.ledger.filter_by_project(project);
    let settlement = Settlement::compute(&slice);
    print!("{}", display::format_settlement(&settlement));
    Ok(())
}

/// `totals`: per-category or per-date aggregation
pub fn handle_totals(
    ledger: &Path,
    project: &str,
    by: TotalsBy,
    from: Option<&str>,
    to: Option<&str>,
) -> LedgerResult<()> {
    let state = load_state(Some(ledger))?;
    let slice = slice_for(&state, project, from, to)?;

    let output = match by {
        TotalsBy::Category => {
            display::format_totals(&totals_by_category(&slice), "분류별 집행액")
        }
        TotalsBy::Date => display::format_totals(&totals_by_date(&slice), "일자별 집행 추이"),
    };
    print!("{}", output);
    Ok(())
}

/// `budget`: review spend against configured ceilings
pub fn handle_budget(ledger: &Path, config: &Path, project: &str) -> LedgerResult<()> {
    let state = load_state(Some(ledger))?;
    let budget = load_budget(config)?;
    let slice = state.ledger.filter_by_project(project);
    let review = BudgetReview::generate(&slice, &budget, &state.categories);
    print!("{}", display::format_budget_review(&review));
    Ok(())
}

/// `export`: write the full ledger back out in canonical form
pub fn handle_export(ledger: &Path, output: Option<&Path>) -> LedgerResult<()> {
    let state = load_state(Some(ledger))?;
    let csv = export_csv(state.ledger.records())?;
    write_output(output, &csv)
}

/// `import`: merge or replace, then emit the resulting ledger as CSV
pub fn handle_import(
    ledger: Option<&Path>,
    input: &Path,
    mode: ImportMode,
    project: &str,
    output: Option<&Path>,
) -> LedgerResult<()> {
    let mut state = load_state(ledger)?;
    let text = fs::read_to_string(input)?;

    let count = match mode {
        ImportMode::Bulk => state.bulk_import(&text, project)?,
        ImportMode::Replace => state.replace_import(&text)?,
    };
    eprintln!("경비 {}건 등록 완료", count);

    let csv = export_csv(state.ledger.records())?;
    write_output(output, &csv)
}

/// `delete-project`: admin-gated cascade delete, emitting the surviving
/// ledger
pub fn handle_delete_project(
    ledger: &Path,
    name: &str,
    admin_secret: &str,
    password: &str,
    output: Option<&Path>,
) -> LedgerResult<()> {
    let gate = AdminGate::with_secret(admin_secret);
    let token = gate.authorize(password)?;

    let mut state = load_state(Some(ledger))?;
    let removed = state.delete_project(name, &token)?;
    eprintln!("프로젝트 '{}' 삭제: 경비 {}건 제거", name, removed);

    let csv = export_csv(state.ledger.records())?;
    write_output(output, &csv)
}

/// `scan`: run the receipt heuristics over extracted text
pub fn handle_scan(text_file: &Path) -> LedgerResult<()> {
    let text = fs::read_to_string(text_file)?;
    let hint = scan_receipt_text(&text);
    println!(
        "날짜: {}  금액: {}",
        hint.date.as_deref().unwrap_or("(없음)"),
        hint.amount.format_grouped()
    );
    Ok(())
}

fn write_output(output: Option<&Path>, csv: &str) -> LedgerResult<()> {
    match output {
        Some(path) => {
            fs::write(path, csv)?;
        }
        None => print!("{}", csv),
    }
    Ok(())
}
