//! Project, category, and participant registries plus budget configuration
//!
//! Small per-session registries of valid names. Projects and categories are
//! ordinary string names; the wildcard project selects all projects and is
//! never stored on a record. The budget configuration maps category names
//! (plus the distinguished `total` key) to spending ceilings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseRecord, Money};

/// Distinguished project name selecting every project
pub const ALL_PROJECTS: &str = "전체 프로젝트";

/// Fallback project used when a record is entered while the wildcard is
/// selected, or when an import row carries no project
pub const DEFAULT_PROJECT: &str = "기본 프로젝트";

/// Budget key for the overall ceiling across all categories
pub const TOTAL_BUDGET_KEY: &str = "total";

/// Seed categories for a fresh session
pub const SEED_CATEGORIES: [&str; 6] = ["교통", "숙박", "식비", "관광", "쇼핑", "기타"];

/// Named scopes for grouping expenses
///
/// Seeded with the wildcard name. Projects are created explicitly by any
/// user, or implicitly when an import references an unknown name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRegistry {
    names: Vec<String>,
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self {
            names: vec![ALL_PROJECTS.to_string()],
        }
    }
}

impl ProjectRegistry {
    /// Create a registry seeded with the wildcard project
    pub fn new() -> Self {
        Self::default()
    }

    /// All project names in registration order, wildcard first
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check membership
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Add a new project; rejects empty names and duplicates
    pub fn add(&mut self, name: &str) -> LedgerResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "project name must not be empty".into(),
            ));
        }
        if self.contains(name) {
            return Err(LedgerError::duplicate_project(name));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    /// Register a name if it is new, silently ignoring empties and
    /// duplicates (import path)
    pub fn ensure(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() && !self.contains(name) {
            self.names.push(name.to_string());
        }
    }

    /// Remove a project name; the wildcard cannot be removed
    pub fn remove(&mut self, name: &str) -> LedgerResult<()> {
        if name == ALL_PROJECTS {
            return Err(LedgerError::Validation(
                "the wildcard project cannot be deleted".into(),
            ));
        }
        let before = self.names.len();
        self.names.retain(|n| n != name);
        if self.names.len() == before {
            return Err(LedgerError::project_not_found(name));
        }
        Ok(())
    }

    /// Resolve a selected project for record creation: the wildcard maps to
    /// the default project, which is never stored on a record
    pub fn resolve_selection(selected: &str) -> &str {
        if selected == ALL_PROJECTS || selected.is_empty() {
            DEFAULT_PROJECT
        } else {
            selected
        }
    }
}

/// Named expense classifications
///
/// A fixed initial set is seeded; additions and removals are
/// administrator-only and handled at the state layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            names: SEED_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CategoryRegistry {
    /// Create a registry with the seed categories
    pub fn new() -> Self {
        Self::default()
    }

    /// All category names in registration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check membership (used at record-creation time only; records are not
    /// re-validated when categories change)
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Add a new category; rejects empty names and duplicates
    pub fn add(&mut self, name: &str) -> LedgerResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "category name must not be empty".into(),
            ));
        }
        if self.contains(name) {
            return Err(LedgerError::duplicate_category(name));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    /// Remove a category; blocked when it would leave zero categories
    pub fn remove(&mut self, name: &str) -> LedgerResult<()> {
        if !self.contains(name) {
            return Err(LedgerError::category_not_found(name));
        }
        if self.names.len() == 1 {
            return Err(LedgerError::Validation(
                "cannot delete the last remaining category".into(),
            ));
        }
        self.names.retain(|n| n != name);
        Ok(())
    }
}

/// The set of distinct participant names seen on expense records
///
/// Participants have no entity of their own; the name on the record is the
/// identity. Insertion order is preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantSet {
    names: Vec<String>,
}

impl ParticipantSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// All names in first-seen order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Register a name, ignoring empties and duplicates
    pub fn register(&mut self, name: &str) {
        if !name.is_empty() && !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }

    /// Rebuild the set from a ledger slice (full-replace import)
    pub fn recompute_from(&mut self, records: &[ExpenseRecord]) {
        self.names.clear();
        for record in records {
            self.register(&record.participant);
        }
    }
}

/// Per-category spending ceilings, plus the `total` ceiling
///
/// Absence of a key means no ceiling is configured; a zero ceiling disables
/// the over-budget warning, since the check requires ceiling > 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetConfig {
    ceilings: BTreeMap<String, Money>,
}

impl BudgetConfig {
    /// Create an empty (unconfigured) budget
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a ceiling for a category name or [`TOTAL_BUDGET_KEY`]
    pub fn set(&mut self, name: &str, ceiling: Money) -> LedgerResult<()> {
        if ceiling.is_negative() {
            return Err(LedgerError::Validation(format!(
                "budget ceiling for '{}' must be non-negative",
                name
            )));
        }
        self.ceilings.insert(name.to_string(), ceiling);
        Ok(())
    }

    /// Ceiling for a name; zero when not configured
    pub fn ceiling(&self, name: &str) -> Money {
        self.ceilings.get(name).copied().unwrap_or_default()
    }

    /// The overall ceiling across all categories
    pub fn total_ceiling(&self) -> Money {
        self.ceiling(TOTAL_BUDGET_KEY)
    }

    /// Whether any ceiling has been configured
    pub fn is_configured(&self) -> bool {
        !self.ceilings.is_empty()
    }

    /// Over-budget rule: spend exceeds a configured, positive ceiling
    pub fn exceeds(spent: Money, ceiling: Money) -> bool {
        ceiling.is_positive() && spent > ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseDraft;

    #[test]
    fn test_project_registry_seeded_with_wildcard() {
        let projects = ProjectRegistry::new();
        assert_eq!(projects.names(), [ALL_PROJECTS]);
    }

    #[test]
    fn test_project_add_and_duplicate() {
        let mut projects = ProjectRegistry::new();
        projects.add("워크숍").unwrap();
        assert!(projects.contains("워크숍"));

        let err = projects.add("워크숍").unwrap_err();
        assert!(matches!(err, LedgerError::Duplicate { .. }));

        assert!(projects.add("   ").is_err());
    }

    #[test]
    fn test_wildcard_cannot_be_removed() {
        let mut projects = ProjectRegistry::new();
        assert!(projects.remove(ALL_PROJECTS).is_err());
    }

    #[test]
    fn test_resolve_selection() {
        assert_eq!(ProjectRegistry::resolve_selection(ALL_PROJECTS), DEFAULT_PROJECT);
        assert_eq!(ProjectRegistry::resolve_selection(""), DEFAULT_PROJECT);
        assert_eq!(ProjectRegistry::resolve_selection("워크숍"), "워크숍");
    }

    #[test]
    fn test_category_seed() {
        let categories = CategoryRegistry::new();
        assert_eq!(categories.names().len(), SEED_CATEGORIES.len());
        assert!(categories.contains("식비"));
    }

    #[test]
    fn test_category_removal_blocked_at_one() {
        let mut categories = CategoryRegistry::new();
        for name in &SEED_CATEGORIES[1..] {
            categories.remove(name).unwrap();
        }
        assert_eq!(categories.names().len(), 1);

        let err = categories.remove(SEED_CATEGORIES[0]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_participant_set_order_and_dedup() {
        let mut participants = ParticipantSet::new();
        participants.register("김철수");
        participants.register("");
        participants.register("이영희");
        participants.register("김철수");
        assert_eq!(participants.names(), ["김철수", "이영희"]);
    }

    #[test]
    fn test_participant_recompute() {
        let records: Vec<_> = [("a", "김철수"), ("b", "이영희"), ("c", "김철수")]
            .iter()
            .enumerate()
            .map(|(i, (desc, who))| {
                ExpenseDraft::new("워크숍", "식비", "2025-03-01", Money::from_units(1000))
                    .with_description(*desc)
                    .with_participant(*who)
                    .into_record(i as u64 + 1)
            })
            .collect();

        let mut participants = ParticipantSet::new();
        participants.register("박민수");
        participants.recompute_from(&records);
        assert_eq!(participants.names(), ["김철수", "이영희"]);
    }

    #[test]
    fn test_budget_ceiling_defaults_to_zero() {
        let budget = BudgetConfig::new();
        assert_eq!(budget.ceiling("식비"), Money::zero());
        assert!(!budget.is_configured());
    }

    #[test]
    fn test_budget_exceeds_requires_positive_ceiling() {
        assert!(BudgetConfig::exceeds(
            Money::from_units(120000),
            Money::from_units(100000)
        ));
        assert!(!BudgetConfig::exceeds(
            Money::from_units(120000),
            Money::zero()
        ));
        assert!(!BudgetConfig::exceeds(
            Money::from_units(90000),
            Money::from_units(100000)
        ));
    }

    #[test]
    fn test_budget_rejects_negative_ceiling() {
        let mut budget = BudgetConfig::new();
        assert!(budget.set("식비", Money::from_units(-1)).is_err());
    }

    #[test]
    fn test_budget_json_shape() {
        let mut budget = BudgetConfig::new();
        budget.set(TOTAL_BUDGET_KEY, Money::from_units(100000)).unwrap();
        budget.set("식비", Money::from_units(30000)).unwrap();

        let json = serde_json::to_string(&budget).unwrap();
        let parsed: BudgetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_ceiling(), Money::from_units(100000));
        assert_eq!(parsed.ceiling("식비"), Money::from_units(30000));
    }
}
