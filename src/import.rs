//! CSV import
//!
//! Two entry points matching the two upload paths: additive bulk
//! registration (subset of columns, ids reassigned) and full replacement
//! (all ten canonical columns required). Both validate the header before
//! touching any row, so a failed import leaves the ledger unchanged.

use std::collections::HashMap;

use csv::StringRecord;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Attachment, ExpenseDraft, ExpenseRecord, Money};

/// The ten canonical columns of the interchange format, in order
pub const CANONICAL_COLUMNS: [&str; 10] = [
    "ID",
    "project",
    "category",
    "date",
    "amount",
    "description",
    "participant",
    "attachment",
    "quantity",
    "note",
];

/// Columns a bulk-registration file must carry (`project` is exempt because
/// an absent project column is defaulted per-row instead)
const BULK_REQUIRED_COLUMNS: [&str; 5] = ["category", "date", "amount", "description", "participant"];

/// Strip a UTF-8 byte-order marker, which spreadsheet exports prepend
fn strip_bom(input: &str) -> &str {
    input.strip_prefix('\u{feff}').unwrap_or(input)
}

fn header_index(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_string(), idx))
        .collect()
}

fn missing_columns(index: &HashMap<String, usize>, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !index.contains_key(**name))
        .map(|name| name.to_string())
        .collect()
}

fn field<'a>(record: &'a StringRecord, index: &HashMap<String, usize>, name: &str) -> &'a str {
    index
        .get(name)
        .and_then(|&idx| record.get(idx))
        .unwrap_or("")
        .trim()
}

fn parse_amount(raw: &str, row: usize) -> LedgerResult<Money> {
    let amount = Money::parse(raw)
        .map_err(|_| LedgerError::Import(format!("row {}: invalid amount '{}'", row, raw)))?;
    if amount.is_negative() {
        return Err(LedgerError::Import(format!(
            "row {}: amount must be non-negative, got {}",
            row, amount
        )));
    }
    Ok(amount)
}

fn parse_quantity(raw: &str, row: usize) -> LedgerResult<u32> {
    if raw.is_empty() {
        return Ok(1);
    }
    // spreadsheet exports sometimes carry "2.0"; truncate like the amounts
    let value = Money::parse(raw)
        .map_err(|_| LedgerError::Import(format!("row {}: invalid quantity '{}'", row, raw)))?
        .units();
    if value < 1 {
        return Err(LedgerError::Import(format!(
            "row {}: quantity must be a positive integer, got {}",
            row, raw
        )));
    }
    u32::try_from(value)
        .map_err(|_| LedgerError::Import(format!("row {}: quantity '{}' out of range", row, raw)))
}

/// Parse a bulk-registration CSV into drafts
///
/// Requires `category, date, amount, description, participant` (plus
/// `project`, defaulted to `default_project` when the column is absent). Any
/// `ID` column is ignored; the ledger reassigns ids on append. Missing
/// `attachment`/`quantity`/`note` default to empty, 1, and empty.
pub fn read_bulk_csv(input: &str, default_project: &str) -> LedgerResult<Vec<ExpenseDraft>> {
    let mut reader = csv::Reader::from_reader(strip_bom(input).as_bytes());
    let index = header_index(reader.headers()?);

    let missing = missing_columns(&index, &BULK_REQUIRED_COLUMNS);
    if !missing.is_empty() {
        return Err(LedgerError::MissingColumns { columns: missing });
    }
    let has_project = index.contains_key("project");

    let mut drafts = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 1;
        let record = result?;

        let project = if has_project {
            let name = field(&record, &index, "project");
            if name.is_empty() {
                default_project.to_string()
            } else {
                name.to_string()
            }
        } else {
            default_project.to_string()
        };

        let draft = ExpenseDraft {
            project,
            category: field(&record, &index, "category").to_string(),
            date: field(&record, &index, "date").to_string(),
            amount: parse_amount(field(&record, &index, "amount"), row)?,
            description: field(&record, &index, "description").to_string(),
            participant: field(&record, &index, "participant").to_string(),
            attachment: Attachment::from_encoded(field(&record, &index, "attachment")),
            quantity: parse_quantity(field(&record, &index, "quantity"), row)?,
            note: field(&record, &index, "note").to_string(),
        };
        drafts.push(draft);
    }

    debug!(rows = drafts.len(), "parsed bulk import file");
    Ok(drafts)
}

/// Parse a full-replacement CSV into complete records
///
/// All ten canonical columns are required, ids included; the result is
/// intended for [`crate::ledger::Ledger::replace_all`].
pub fn read_replace_csv(input: &str) -> LedgerResult<Vec<ExpenseRecord>> {
    let mut reader = csv::Reader::from_reader(strip_bom(input).as_bytes());
    let index = header_index(reader.headers()?);

    let missing = missing_columns(&index, &CANONICAL_COLUMNS);
    if !missing.is_empty() {
        return Err(LedgerError::MissingColumns { columns: missing });
    }

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 1;
        let record = result?;

        let id_raw = field(&record, &index, "ID");
        let id: u64 = id_raw
            .parse()
            .map_err(|_| LedgerError::Import(format!("row {}: invalid ID '{}'", row, id_raw)))?;

        records.push(ExpenseRecord {
            id,
            project: field(&record, &index, "project").to_string(),
            category: field(&record, &index, "category").to_string(),
            date: field(&record, &index, "date").to_string(),
            amount: parse_amount(field(&record, &index, "amount"), row)?,
            description: field(&record, &index, "description").to_string(),
            participant: field(&record, &index, "participant").to_string(),
            attachment: Attachment::from_encoded(field(&record, &index, "attachment")),
            quantity: parse_quantity(field(&record, &index, "quantity"), row)?,
            note: field(&record, &index, "note").to_string(),
        });
    }

    debug!(rows = records.len(), "parsed full-replacement file");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULK_HEADER: &str = "project,category,date,amount,description,participant";

    #[test]
    fn test_bulk_import_parses_rows() {
        let input = format!(
            "{}\n워크숍,식비,2025-03-01,12000,점심,김철수\n워크숍,교통,2025-03-02,3000,버스,이영희\n",
            BULK_HEADER
        );
        let drafts = read_bulk_csv(&input, "기본 프로젝트").unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].project, "워크숍");
        assert_eq!(drafts[0].amount, Money::from_units(12000));
        assert_eq!(drafts[0].quantity, 1);
        assert!(drafts[0].attachment.is_none());
    }

    #[test]
    fn test_bulk_import_missing_amount_names_column() {
        let input = "project,category,date,description,participant\n워크숍,식비,2025-03-01,점심,김철수\n";
        let err = read_bulk_csv(input, "기본 프로젝트").unwrap_err();
        match err {
            LedgerError::MissingColumns { columns } => {
                assert_eq!(columns, vec!["amount".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_bulk_import_defaults_absent_project_column() {
        let input = "category,date,amount,description,participant\n식비,2025-03-01,12000,점심,김철수\n";
        let drafts = read_bulk_csv(input, "기본 프로젝트").unwrap();
        assert_eq!(drafts[0].project, "기본 프로젝트");
    }

    #[test]
    fn test_bulk_import_ignores_id_column() {
        let input = format!(
            "ID,{}\n999,워크숍,식비,2025-03-01,12000,점심,김철수\n",
            BULK_HEADER
        );
        // parse succeeds; the draft carries no id and the ledger assigns one
        let drafts = read_bulk_csv(&input, "기본 프로젝트").unwrap();
        assert_eq!(drafts.len(), 1);
    }

    #[test]
    fn test_bulk_import_rejects_negative_amount() {
        let input = format!("{}\n워크숍,식비,2025-03-01,-500,점심,김철수\n", BULK_HEADER);
        let err = read_bulk_csv(&input, "기본 프로젝트").unwrap_err();
        assert!(err.is_import());
    }

    #[test]
    fn test_bulk_import_quantity_variants() {
        let input = format!(
            "{},quantity\n워크숍,식비,2025-03-01,500,a,김철수,\n워크숍,식비,2025-03-01,500,b,김철수,2.0\n",
            BULK_HEADER
        );
        let drafts = read_bulk_csv(&input, "기본 프로젝트").unwrap();
        assert_eq!(drafts[0].quantity, 1);
        assert_eq!(drafts[1].quantity, 2);
    }

    #[test]
    fn test_replace_import_requires_all_columns() {
        let input = format!("{}\n워크숍,식비,2025-03-01,500,점심,김철수\n", BULK_HEADER);
        let err = read_replace_csv(&input).unwrap_err();
        match err {
            LedgerError::MissingColumns { columns } => {
                assert_eq!(
                    columns,
                    vec!["ID".to_string(), "attachment".to_string(), "quantity".to_string(), "note".to_string()]
                );
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_replace_import_keeps_ids() {
        let input = "ID,project,category,date,amount,description,participant,attachment,quantity,note\n\
                     7,워크숍,식비,2025-03-01,500,점심,김철수,,1,\n";
        let records = read_replace_csv(input).unwrap();
        assert_eq!(records[0].id, 7);
        assert_eq!(records[0].note, "");
    }

    #[test]
    fn test_bom_is_stripped() {
        let input = format!(
            "\u{feff}{}\n워크숍,식비,2025-03-01,500,점심,김철수\n",
            BULK_HEADER
        );
        let drafts = read_bulk_csv(&input, "기본 프로젝트").unwrap();
        assert_eq!(drafts.len(), 1);
    }
}
