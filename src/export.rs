//! CSV export
//!
//! Serializes the ledger table to the canonical ten-column interchange
//! format. Output starts with a UTF-8 byte-order marker so spreadsheet tools
//! that expect `utf-8-sig` render the Korean text correctly.

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::import::CANONICAL_COLUMNS;
use crate::models::ExpenseRecord;

/// Serialize records to CSV text, BOM included
///
/// The output round-trips through [`crate::import::read_replace_csv`] to an
/// equivalent ledger.
pub fn export_csv(records: &[ExpenseRecord]) -> LedgerResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CANONICAL_COLUMNS)?;

    for record in records {
        let id = record.id.to_string();
        let amount = record.amount.units().to_string();
        let quantity = record.quantity.to_string();
        writer.write_record([
            id.as_str(),
            record.project.as_str(),
            record.category.as_str(),
            record.date.as_str(),
            amount.as_str(),
            record.description.as_str(),
            record.participant.as_str(),
            record
                .attachment
                .as_ref()
                .map(|a| a.as_str())
                .unwrap_or(""),
            quantity.as_str(),
            record.note.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    let body =
        String::from_utf8(bytes).map_err(|e| LedgerError::Export(e.to_string()))?;

    debug!(rows = records.len(), "exported ledger to CSV");
    Ok(format!("\u{feff}{}", body))
}
