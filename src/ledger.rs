//! In-memory expense ledger
//!
//! An ordered table of expense records scoped to the process lifetime. The
//! ledger exclusively owns the table; filters hand out cloned slices and all
//! derived computations (aggregation, settlement, reports) work on those.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{ExpenseDraft, ExpenseRecord};
use crate::registry::ALL_PROJECTS;

/// The ordered table of expense records for one session
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the table
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The full table in insertion order
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Append a draft, assigning `id = current_count + 1`
    ///
    /// Ids are not renumbered on delete, so after a project deletion new
    /// inserts can collide with surviving ids. This mirrors the behavior the
    /// tool has always had; see DESIGN.md before changing it.
    pub fn append(&mut self, draft: ExpenseDraft) -> u64 {
        let id = self.records.len() as u64 + 1;
        self.records.push(draft.into_record(id));
        id
    }

    /// Records for one project, or the whole table for the wildcard name;
    /// order preserved
    pub fn filter_by_project(&self, project: &str) -> Vec<ExpenseRecord> {
        if project == ALL_PROJECTS {
            self.records.clone()
        } else {
            self.records
                .iter()
                .filter(|r| r.project == project)
                .cloned()
                .collect()
        }
    }

    /// Find a record by id
    pub fn get(&self, id: u64) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Remove every record belonging to a project; surviving ids keep their
    /// numbers. Returns the number of records removed.
    pub fn delete_by_project(&mut self, project: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.project != project);
        before - self.records.len()
    }

    /// Wholesale substitution of the table (full-replace import path; the
    /// import adapter validates the rows before calling this)
    pub fn replace_all(&mut self, records: Vec<ExpenseRecord>) {
        self.records = records;
    }
}

/// Restrict a slice to records dated within `[start, end]` inclusive
///
/// Soft-degrades: if any date in the slice fails to parse, the whole slice is
/// returned unfiltered with a warning, so an analysis view never aborts over
/// one malformed date.
pub fn filter_by_date_range(
    slice: &[ExpenseRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<ExpenseRecord> {
    let mut parsed = Vec::with_capacity(slice.len());
    for record in slice {
        match record.parsed_date() {
            Some(date) => parsed.push(date),
            None => {
                warn!(
                    record_id = record.id,
                    date = %record.date,
                    "unparseable date in slice; returning unfiltered records"
                );
                return slice.to_vec();
            }
        }
    }

    slice
        .iter()
        .zip(parsed)
        .filter(|(_, date)| (start..=end).contains(date))
        .map(|(record, _)| record.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn draft(project: &str, date: &str, amount: i64) -> ExpenseDraft {
        ExpenseDraft::new(project, "식비", date, Money::from_units(amount))
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut ledger = Ledger::new();
        for i in 0..5 {
            ledger.append(draft("워크숍", "2025-03-01", 1000 * (i + 1)));
        }
        let ids: Vec<u64> = ledger.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_filter_by_project() {
        let mut ledger = Ledger::new();
        ledger.append(draft("워크숍", "2025-03-01", 1000));
        ledger.append(draft("학회", "2025-03-02", 2000));
        ledger.append(draft("워크숍", "2025-03-03", 3000));

        let filtered = ledger.filter_by_project("워크숍");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.project == "워크숍"));

        // wildcard selects everything
        assert_eq!(ledger.filter_by_project(ALL_PROJECTS).len(), 3);
    }

    #[test]
    fn test_delete_by_project_keeps_ids() {
        let mut ledger = Ledger::new();
        ledger.append(draft("워크숍", "2025-03-01", 1000));
        ledger.append(draft("학회", "2025-03-02", 2000));
        ledger.append(draft("워크숍", "2025-03-03", 3000));

        let removed = ledger.delete_by_project("워크숍");
        assert_eq!(removed, 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].id, 2);

        // new insert after deletion reuses the low id (documented behavior)
        let id = ledger.append(draft("학회", "2025-03-04", 4000));
        assert_eq!(id, 2);
    }

    #[test]
    fn test_date_range_filter_inclusive() {
        let mut ledger = Ledger::new();
        ledger.append(draft("워크숍", "2025-03-01", 1000));
        ledger.append(draft("워크숍", "2025-03-05", 2000));
        ledger.append(draft("워크숍", "2025-03-10", 3000));

        let filtered = filter_by_date_range(
            ledger.records(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        );
        let dates: Vec<&str> = filtered.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2025-03-01", "2025-03-05"]);
    }

    #[test]
    fn test_date_range_filter_soft_fails_on_bad_date() {
        let mut ledger = Ledger::new();
        ledger.append(draft("워크숍", "2025-03-01", 1000));
        ledger.append(draft("워크숍", "not-a-date", 2000));

        let filtered = filter_by_date_range(
            ledger.records(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );
        // falls back to the whole slice rather than erroring
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_replace_all() {
        let mut ledger = Ledger::new();
        ledger.append(draft("워크숍", "2025-03-01", 1000));

        let replacement =
            vec![draft("학회", "2025-04-01", 9000).into_record(1)];
        ledger.replace_all(replacement);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].project, "학회");
    }
}
