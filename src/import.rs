use std::num::IntErrorKind;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use crate::constants::{
    CSV_AGE_COLUMN, CSV_NAME_COLUMN, ERR_AGE_NOT_INTEGER, ERR_AGE_OUT_OF_RANGE,
    ERR_MISSING_CSV_COLUMNS,
};
use crate::error::{AppError, Result};
use crate::models::NewUser;
use crate::store::UserStore;

/// One data row of an uploaded CSV, validated but not yet inserted
#[derive(Debug, Clone, PartialEq)]
struct CsvRow {
    /// 1-based line number in the uploaded file
    line: u64,
    /// Raw name cell (empty if the row had none)
    name: String,
    user: std::result::Result<NewUser, String>,
}

/// A row that was not inserted, and why
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub row: u64,
    pub name: String,
    pub reason: String,
}

/// Outcome of a bulk import
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub rejected: Vec<RejectedRow>,
}

impl ImportSummary {
    pub fn skipped_names(&self) -> Vec<String> {
        self.rejected.iter().map(|r| r.name.clone()).collect()
    }
}

/// Column positions of the required fields in the header
struct Columns {
    name: usize,
    age: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Option<Self> {
        let name = headers.iter().position(|h| h == CSV_NAME_COLUMN)?;
        let age = headers.iter().position(|h| h == CSV_AGE_COLUMN)?;
        Some(Self { name, age })
    }
}

/// Decode a CSV payload into validated rows
///
/// The header must contain `Name` and `Age` (case-sensitive, any order, extra
/// columns ignored). Per-row problems are captured in the row itself so the
/// caller can report them; only a bad header fails the whole payload.
fn parse_users(data: &[u8]) -> Result<Vec<CsvRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Short rows are rejected individually, not fatally
        .trim(Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| AppError::MalformedInput(format!("Failed to read CSV header: {}", e)))?
        .clone();

    let columns = Columns::locate(&headers).ok_or_else(|| {
        tracing::warn!("CSV header missing required columns: {:?}", headers);
        AppError::MalformedInput(ERR_MISSING_CSV_COLUMNS.to_string())
    })?;

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        // Header occupies line 1
        let fallback_line = index as u64 + 2;

        let row = match result {
            Ok(record) => {
                let line = record.position().map_or(fallback_line, |p| p.line());
                let name = record.get(columns.name).unwrap_or("").to_string();
                let age = record.get(columns.age).unwrap_or("");
                let user = parse_age(age)
                    .and_then(|age| NewUser::parse(&name, age))
                    .map_err(str::to_string);
                CsvRow { line, name, user }
            }
            Err(e) => CsvRow {
                line: e.position().map_or(fallback_line, |p| p.line()),
                name: String::new(),
                user: Err(format!("Unreadable row: {}", e)),
            },
        };
        rows.push(row);
    }

    Ok(rows)
}

fn parse_age(raw: &str) -> std::result::Result<i64, &'static str> {
    raw.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ERR_AGE_OUT_OF_RANGE,
        _ => ERR_AGE_NOT_INTEGER,
    })
}

/// Parse a CSV payload and insert every valid row into the store
///
/// Not atomic: valid rows are kept even when others are rejected. A row whose
/// name already exists, including one inserted earlier in the same batch, is
/// rejected as a duplicate.
pub fn import_users(store: &mut UserStore, data: &[u8]) -> Result<ImportSummary> {
    let rows = parse_users(data)?;
    let mut summary = ImportSummary::default();

    for row in rows {
        let outcome = row.user.and_then(|new_user| {
            store.create(new_user).map_err(|e| e.to_string())
        });

        match outcome {
            Ok(user) => {
                tracing::debug!("Imported user {} from line {}", user.id, row.line);
                summary.inserted += 1;
            }
            Err(reason) => {
                tracing::debug!("Skipping CSV line {}: {}", row.line, reason);
                summary.rejected.push(RejectedRow {
                    row: row.line,
                    name: row.name,
                    reason,
                });
            }
        }
    }

    tracing::info!(
        "CSV import finished: {} inserted, {} rejected",
        summary.inserted,
        summary.rejected.len()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ERR_EMPTY_NAME, ERR_NEGATIVE_AGE};

    #[test]
    fn test_import_two_rows() {
        let mut store = UserStore::new();
        let summary = import_users(&mut store, b"Name,Age\nJohn,30\nJane,25").unwrap();

        assert_eq!(summary.inserted, 2);
        assert!(summary.rejected.is_empty());

        let users = store.list();
        assert_eq!(users[0].name, "John");
        assert_eq!(users[0].age, 30);
        assert_eq!(users[1].name, "Jane");
        assert_eq!(users[1].age, 25);
    }

    #[test]
    fn test_headerless_file_is_malformed() {
        let mut store = UserStore::new();
        let result = import_users(&mut store, b"John,30\nJane,25");

        assert!(matches!(result, Err(AppError::MalformedInput(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_empty_payload_is_malformed() {
        assert!(matches!(parse_users(b""), Err(AppError::MalformedInput(_))));
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        assert!(matches!(
            parse_users(b"name,age\nJohn,30"),
            Err(AppError::MalformedInput(_))
        ));
        assert!(matches!(
            parse_users(b"Name\nKevin"),
            Err(AppError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let rows = parse_users(b"Email,Age,Name\nx@y.z,41,Ann").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].user,
            Ok(NewUser {
                name: "Ann".to_string(),
                age: 41
            })
        );
    }

    #[test]
    fn test_duplicate_against_store_is_partial_success() {
        let mut store = UserStore::new();
        store
            .create(NewUser {
                name: "Heidi".to_string(),
                age: 60,
            })
            .unwrap();

        let summary = import_users(&mut store, b"Name,Age\nHeidi,61\nIvy,65").unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].name, "Heidi");
        assert_eq!(summary.rejected[0].row, 2);
        assert!(summary.rejected[0].reason.contains("already exists"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_duplicate_within_batch() {
        let mut store = UserStore::new();
        let summary = import_users(&mut store, b"Name,Age\nAmy,20\nAmy,21").unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped_names(), vec!["Amy"]);
        assert_eq!(store.list()[0].age, 20);
    }

    #[test]
    fn test_invalid_rows_are_rejected_individually() {
        let mut store = UserStore::new();
        let data = b"Name,Age\nJudy,\n,40\nOld,-3\nBig,99999999999999999999\nAbe,x\nShort\nOk,7";
        let summary = import_users(&mut store, data).unwrap();

        assert_eq!(summary.inserted, 1);
        assert_eq!(store.list()[0].name, "Ok");

        let reasons: Vec<_> = summary.rejected.iter().map(|r| r.reason.as_str()).collect();
        assert_eq!(
            reasons,
            vec![
                ERR_AGE_NOT_INTEGER,
                ERR_EMPTY_NAME,
                ERR_NEGATIVE_AGE,
                ERR_AGE_OUT_OF_RANGE,
                ERR_AGE_NOT_INTEGER,
                ERR_AGE_NOT_INTEGER,
            ]
        );

        let lines: Vec<_> = summary.rejected.iter().map(|r| r.row).collect();
        assert_eq!(lines, vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(summary.rejected[0].name, "Judy");
    }

    #[test]
    fn test_cells_are_trimmed() {
        let rows = parse_users(b"Name,Age\n  Liam , 22 ").unwrap();
        assert_eq!(
            rows[0].user,
            Ok(NewUser {
                name: "Liam".to_string(),
                age: 22
            })
        );
    }
}
