//! Per-session application state
//!
//! One explicit state object holds the ledger, the name registries, and the
//! budget configuration, constructed once per session and passed by
//! reference to each handler. Mutations that the original tool gated behind
//! the administrator password take an [`AdminToken`].

use chrono::NaiveDate;
use tracing::debug;

use crate::auth::AdminToken;
use crate::error::{LedgerError, LedgerResult};
use crate::import::{read_bulk_csv, read_replace_csv};
use crate::ledger::Ledger;
use crate::models::{ExpenseDraft, DATE_FORMAT};
use crate::registry::{
    BudgetConfig, CategoryRegistry, ParticipantSet, ProjectRegistry, ALL_PROJECTS,
};

/// The whole mutable state of one interactive session
#[derive(Debug, Default)]
pub struct AppState {
    pub ledger: Ledger,
    pub projects: ProjectRegistry,
    pub categories: CategoryRegistry,
    pub participants: ParticipantSet,
    pub budget: BudgetConfig,
}

impl AppState {
    /// Fresh session: empty ledger, seeded registries, unset budget
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a manually entered expense
    ///
    /// The draft's project is the user's current selection; the wildcard (or
    /// an empty selection) resolves to the default project. Registers the
    /// participant and project names as a side effect. Returns the assigned
    /// id.
    pub fn add_expense(&mut self, mut draft: ExpenseDraft) -> LedgerResult<u64> {
        if !self.categories.contains(&draft.category) {
            return Err(LedgerError::category_not_found(&draft.category));
        }
        if draft.amount.is_negative() {
            return Err(LedgerError::Validation(
                "amount must be non-negative".into(),
            ));
        }
        if draft.quantity == 0 {
            return Err(LedgerError::Validation(
                "quantity must be a positive integer".into(),
            ));
        }
        if NaiveDate::parse_from_str(&draft.date, DATE_FORMAT).is_err() {
            return Err(LedgerError::Validation(format!(
                "date '{}' is not in YYYY-MM-DD form",
                draft.date
            )));
        }

        draft.project = ProjectRegistry::resolve_selection(&draft.project).to_string();

        self.participants.register(&draft.participant);
        self.projects.ensure(&draft.project);
        let id = self.ledger.append(draft);
        debug!(id, "expense appended");
        Ok(id)
    }

    /// Delete a project and every expense recorded against it
    /// (administrator only; the wildcard cannot be deleted)
    pub fn delete_project(&mut self, name: &str, _admin: &AdminToken) -> LedgerResult<usize> {
        if name == ALL_PROJECTS {
            return Err(LedgerError::Validation(
                "the wildcard project cannot be deleted".into(),
            ));
        }
        self.projects.remove(name)?;
        let removed = self.ledger.delete_by_project(name);
        debug!(project = name, removed, "project deleted");
        Ok(removed)
    }

    /// Replace the budget configuration (administrator only)
    pub fn set_budget(&mut self, budget: BudgetConfig, _admin: &AdminToken) {
        self.budget = budget;
    }

    /// Add a category (administrator only)
    pub fn add_category(&mut self, name: &str, _admin: &AdminToken) -> LedgerResult<()> {
        self.categories.add(name)
    }

    /// Remove a category (administrator only; blocked at the last one)
    pub fn remove_category(&mut self, name: &str, _admin: &AdminToken) -> LedgerResult<()> {
        self.categories.remove(name)
    }

    /// Additive bulk registration from CSV text
    ///
    /// `selected_project` is the user's current selection; rows without a
    /// project land there (or in the default project when the wildcard is
    /// selected). Ids continue from the current ledger size. Newly seen
    /// participant and project names are registered. Returns the number of
    /// rows appended; a validation failure appends nothing.
    pub fn bulk_import(&mut self, input: &str, selected_project: &str) -> LedgerResult<usize> {
        let default_project = ProjectRegistry::resolve_selection(selected_project);
        let drafts = read_bulk_csv(input, default_project)?;

        let count = drafts.len();
        for draft in drafts {
            self.participants.register(&draft.participant);
            self.projects.ensure(&draft.project);
            self.ledger.append(draft);
        }
        debug!(rows = count, "bulk import applied");
        Ok(count)
    }

    /// Full-replacement import from CSV text
    ///
    /// Replaces the entire ledger and recomputes the participant set from
    /// the new data. Projects only gain newly seen names; the budget
    /// configuration is left untouched. Returns the new record count.
    pub fn replace_import(&mut self, input: &str) -> LedgerResult<usize> {
        let records = read_replace_csv(input)?;

        for record in &records {
            self.projects.ensure(&record.project);
        }
        self.participants.recompute_from(&records);
        let count = records.len();
        self.ledger.replace_all(records);
        debug!(rows = count, "full-replacement import applied");
        Ok(count)
    }
}
