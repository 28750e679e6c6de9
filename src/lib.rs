//! splitbook - expense ledger with budget tracking and dutch-pay settlement
//!
//! This library records expense line items against projects and categories,
//! compares spend to configured budget ceilings, splits cost fairly among
//! participants, and assembles a printable expense statement. The ledger is
//! an in-memory table scoped to one session; the ten-column CSV interchange
//! format carries it between sessions and spreadsheet tools.
//!
//! # Architecture
//!
//! - `error`: custom error types
//! - `models`: core data models (money, expense records)
//! - `ledger`: the in-memory expense table and its filters
//! - `registry`: project/category/participant registries and budget config
//! - `state`: the per-session application state object
//! - `auth`: the administrative gate
//! - `reports`: aggregation, settlement, budget review, expense statement
//! - `import` / `export`: the CSV interchange adapter
//! - `receipt`: receipt text heuristics (OCR engine is external)
//! - `display`: terminal rendering of reports
//! - `cli`: command handlers for the binary

pub mod auth;
pub mod cli;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod ledger;
pub mod models;
pub mod receipt;
pub mod registry;
pub mod reports;
pub mod state;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use models::{ExpenseDraft, ExpenseRecord, Money};
pub use state::AppState;
