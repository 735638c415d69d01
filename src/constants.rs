/// Default cap on upload request bodies (1MB)
/// A CSV of a few thousand users fits comfortably
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1_048_576;

/// Multipart field carrying the uploaded CSV file
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Content types accepted for CSV uploads
pub const CSV_CONTENT_TYPES: [&str; 2] = ["text/csv", "application/csv"];

/// Required CSV header columns (case-sensitive)
pub const CSV_NAME_COLUMN: &str = "Name";
pub const CSV_AGE_COLUMN: &str = "Age";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for an empty or whitespace-only name
pub const ERR_EMPTY_NAME: &str = "Name must not be empty";

/// Error message for a negative age
pub const ERR_NEGATIVE_AGE: &str = "Age must be a non-negative integer";

/// Error message for an age outside the supported range
pub const ERR_AGE_OUT_OF_RANGE: &str = "Age is out of range";

/// Error message for an age that is not an integer
pub const ERR_AGE_NOT_INTEGER: &str = "Age must be an integer";

/// Error message for a CSV header without the required columns
pub const ERR_MISSING_CSV_COLUMNS: &str = "CSV must contain 'Name' and 'Age' columns.";

/// Error message for an upload with the wrong content type
pub const ERR_INVALID_FILE_TYPE: &str = "Invalid file type. Please upload a CSV file.";

/// Error message for an upload form without a file field
pub const ERR_NO_FILE: &str = "No file provided";

/// Summary message returned after a CSV import
pub const MSG_CSV_PROCESSED: &str = "Processed CSV file.";
