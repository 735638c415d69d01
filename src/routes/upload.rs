use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::constants::{
    CSV_CONTENT_TYPES, ERR_INVALID_FILE_TYPE, ERR_NO_FILE, MSG_CSV_PROCESSED, UPLOAD_FIELD_NAME,
};
use crate::error::{AppError, Result};
use crate::import::{import_users, ImportSummary, RejectedRow};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UploadCsvResponse {
    pub message: String,
    pub added_users: usize,
    pub skipped_users: usize,
    pub skipped_names: Vec<String>,
    pub rejected: Vec<RejectedRow>,
}

impl From<ImportSummary> for UploadCsvResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            message: MSG_CSV_PROCESSED.to_string(),
            added_users: summary.inserted,
            skipped_users: summary.rejected.len(),
            skipped_names: summary.skipped_names(),
            rejected: summary.rejected,
        }
    }
}

/// Check a multipart content type against the accepted CSV types
///
/// Parameters such as `; charset=utf-8` are ignored.
fn is_csv_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    CSV_CONTENT_TYPES.contains(&essence.as_str())
}

/// Bulk import users from an uploaded CSV file
///
/// Expects a multipart form with a `file` field of type `text/csv` whose
/// header contains `Name` and `Age`. Valid rows are inserted; the rest are
/// reported back with the line they came from and the reason.
///
/// Returns 400 for a request that is not multipart, a missing file, a non-CSV
/// file, or a header without the required columns, and 413 when the upload is
/// larger than the configured limit.
pub async fn upload_users_csv(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadCsvResponse>)> {
    let mut multipart = multipart?;
    let limit = state.config.max_upload_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::from_multipart(e, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unnamed").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !is_csv_content_type(&content_type) {
            tracing::warn!(
                "Rejected upload {} with content type '{}'",
                file_name,
                content_type
            );
            return Err(AppError::InvalidInput(ERR_INVALID_FILE_TYPE.to_string()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::from_multipart(e, limit))?;
        tracing::info!("Importing users from {} ({} bytes)", file_name, data.len());

        let summary = import_users(&mut *state.store.write().await, &data)?;

        return Ok((StatusCode::CREATED, Json(summary.into())));
    }

    Err(AppError::InvalidInput(ERR_NO_FILE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_csv_content_type() {
        assert!(is_csv_content_type("text/csv"));
        assert!(is_csv_content_type("Text/CSV; charset=utf-8"));
        assert!(is_csv_content_type("application/csv"));

        assert!(!is_csv_content_type("text/plain"));
        assert!(!is_csv_content_type(""));
    }

    #[test]
    fn test_response_from_summary() {
        let summary = ImportSummary {
            inserted: 1,
            rejected: vec![RejectedRow {
                row: 2,
                name: "Heidi".to_string(),
                reason: "duplicate".to_string(),
            }],
        };

        let response = UploadCsvResponse::from(summary);
        assert_eq!(response.message, MSG_CSV_PROCESSED);
        assert_eq!(response.added_users, 1);
        assert_eq!(response.skipped_users, 1);
        assert_eq!(response.skipped_names, vec!["Heidi"]);
    }
}
