//! Dutch-pay settlement
//!
//! Equal-split reconciliation over a ledger slice: each participant's fair
//! share of the total is compared to what they actually paid, producing a
//! signed balance. Positive means the participant still owes the pool;
//! negative means they are owed a refund.

use crate::models::{ExpenseRecord, Money};

/// One participant's settlement position
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementLine {
    /// Participant name as it appears on the records
    pub participant: String,
    /// What this participant actually paid (raw `amount` sum)
    pub spent: Money,
    /// `round(per_person_share - spent)`; positive = pay in, negative = refund
    pub balance: Money,
}

/// Settlement result for a ledger slice
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// Distinct participant names in first-appearance order. An empty-string
    /// participant counts as a member of the split if present on any record.
    pub participants: Vec<String>,
    /// Total spend over the slice (raw `amount`, not `amount * quantity`)
    pub total: Money,
    /// Equal share per participant; 0.0 when there are no participants
    pub per_person_share: f64,
    /// Per-participant positions, same order as `participants`
    pub lines: Vec<SettlementLine>,
}

impl Settlement {
    /// Compute the settlement for a slice
    ///
    /// Empty slice yields an empty settlement with a zero share.
    pub fn compute(slice: &[ExpenseRecord]) -> Self {
        if slice.is_empty() {
            return Self {
                participants: Vec::new(),
                total: Money::zero(),
                per_person_share: 0.0,
                lines: Vec::new(),
            };
        }

        let mut participants: Vec<String> = Vec::new();
        for record in slice {
            if !participants.iter().any(|p| p == &record.participant) {
                participants.push(record.participant.clone());
            }
        }

        let total: Money = slice.iter().map(|r| r.amount).sum();
        let per_person_share = if participants.is_empty() {
            0.0
        } else {
            total.units() as f64 / participants.len() as f64
        };

        let lines = participants
            .iter()
            .map(|participant| {
                let spent: Money = slice
                    .iter()
                    .filter(|r| &r.participant == participant)
                    .map(|r| r.amount)
                    .sum();
                let balance = Money::from_units(round_half_to_even(
                    per_person_share - spent.units() as f64,
                ));
                SettlementLine {
                    participant: participant.clone(),
                    spent,
                    balance,
                }
            })
            .collect();

        Self {
            participants,
            total,
            per_person_share,
            lines,
        }
    }
}

/// Round to the nearest integer unit, ties to the even neighbor
///
/// Half-to-even keeps repeated settlements reproducible and unbiased at the
/// `.5` boundary; `1.5` and `2.5` both round to `2`.
fn round_half_to_even(value: f64) -> i64 {
    let floor = value.floor();
    let fraction = value - floor;
    let floor = floor as i64;
    if fraction > 0.5 {
        floor + 1
    } else if fraction < 0.5 {
        floor
    } else if floor % 2 == 0 {
        floor
    } else {
        floor + 1
    }
}
