//! Core data models for splitbook
//!
//! This module contains the data structures that represent the expense
//! domain: monetary amounts and ledger line items.

pub mod money;
pub mod record;

pub use money::{Money, MoneyParseError};
pub use record::{Attachment, ExpenseDraft, ExpenseRecord, DATE_FORMAT};
