//! Expense record model
//!
//! One ledger line item: which project it belongs to, how it is classified,
//! what was paid, and by whom. Receipt images travel with the record as an
//! opaque base64 payload.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Date format used for stored expense dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An opaque receipt payload, kept base64-encoded for tabular storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attachment(String);

impl Attachment {
    /// Encode raw image bytes into an attachment
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(BASE64.encode(bytes))
    }

    /// Wrap an already-encoded payload, e.g. from an import file
    ///
    /// Returns `None` for an empty string (absent attachment).
    pub fn from_encoded(encoded: impl Into<String>) -> Option<Self> {
        let encoded = encoded.into();
        if encoded.is_empty() {
            None
        } else {
            Some(Self(encoded))
        }
    }

    /// The encoded payload as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back into raw image bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(&self.0)
    }
}

/// A single expense line item in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Ledger-assigned identifier, unique in assignment order
    pub id: u64,

    /// The project this expense belongs to (never the wildcard name)
    pub project: String,

    /// Expense classification; validated against the category set at
    /// creation time only
    pub category: String,

    /// Calendar date, stored as an ISO-like `YYYY-MM-DD` string
    pub date: String,

    /// Unit amount, non-negative
    pub amount: Money,

    /// Free-text description; truncated to 35 characters at render time only
    #[serde(default)]
    pub description: String,

    /// Payer/beneficiary name; empty string permitted
    #[serde(default)]
    pub participant: String,

    /// Optional receipt image payload
    #[serde(default)]
    pub attachment: Option<Attachment>,

    /// Unit count, positive, default 1
    pub quantity: u32,

    /// Free-text remark
    #[serde(default)]
    pub note: String,
}

impl ExpenseRecord {
    /// The line total used by the expense statement: `amount * quantity`
    ///
    /// Aggregation and settlement sum the raw `amount` instead; the two
    /// conventions are deliberately kept distinct (see DESIGN.md).
    pub fn line_total(&self) -> Money {
        self.amount * self.quantity
    }

    /// Parse the stored date string, if it is well-formed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Whether a receipt image is attached
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} [{}] {} {}",
            self.id, self.date, self.category, self.description, self.amount
        )
    }
}

/// A not-yet-appended expense; the ledger assigns the id
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub project: String,
    pub category: String,
    pub date: String,
    pub amount: Money,
    pub description: String,
    pub participant: String,
    pub attachment: Option<Attachment>,
    pub quantity: u32,
    pub note: String,
}

impl ExpenseDraft {
    /// Create a draft with the required fields and defaults for the rest
    /// (no attachment, quantity 1, empty note)
    pub fn new(
        project: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            project: project.into(),
            category: category.into(),
            date: date.into(),
            amount,
            description: String::new(),
            participant: String::new(),
            attachment: None,
            quantity: 1,
            note: String::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the participant
    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.participant = participant.into();
        self
    }

    /// Set the quantity
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Attach a receipt payload
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Materialize into a record with a ledger-assigned id
    pub fn into_record(self, id: u64) -> ExpenseRecord {
        ExpenseRecord {
            id,
            project: self.project,
            category: self.category,
            date: self.date,
            amount: self.amount,
            description: self.description,
            participant: self.participant,
            attachment: self.attachment,
            quantity: self.quantity,
            note: self.note,
        }
    }
}
