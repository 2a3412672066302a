//! Conversion use-case service.
//!
//! # Responsibility
//! - Run load -> migrate -> write for one input/output pair.
//! - Log a per-run summary of what was converted.
//!
//! # Invariants
//! - The output file is only touched after the migration succeeded.
//! - Failures abort the run; there is no retry and no rollback.

use crate::document::{load_document, write_document, DocumentError};
use crate::migrate::{migrate, MigrateError, Migration, MigrationReport};
use log::{error, info};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Service error for conversion use-cases.
#[derive(Debug)]
pub enum ConvertError {
    /// Reading, parsing or writing a document failed.
    Document(DocumentError),
    /// The input parsed but does not have the expected structure.
    Migrate(MigrateError),
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Document(err) => write!(f, "{err}"),
            Self::Migrate(err) => write!(f, "invalid planner document: {err}"),
        }
    }
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Document(err) => Some(err),
            Self::Migrate(err) => Some(err),
        }
    }
}

impl From<DocumentError> for ConvertError {
    fn from(value: DocumentError) -> Self {
        Self::Document(value)
    }
}

impl From<MigrateError> for ConvertError {
    fn from(value: MigrateError) -> Self {
        Self::Migrate(value)
    }
}

/// Converts the document at `input` and writes the result to `output`.
///
/// # Contract
/// - Already-migrated input is written back unchanged.
/// - Returns the entity counts of the conversion.
///
/// # Errors
/// - `ConvertError::Document` for unreadable input, invalid JSON or an
///   unwritable output path.
/// - `ConvertError::Migrate` for structural shape mismatches.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> ConvertResult<MigrationReport> {
    let started_at = Instant::now();
    let source = load_document(input)?;
    let migration = convert_value(source)?;
    write_document(output, &migration.document)?;

    info!(
        "event=convert module=service status=ok duration_ms={} passthrough={}",
        started_at.elapsed().as_millis(),
        migration.passthrough
    );
    Ok(migration.report)
}

/// Migrates an already-parsed document.
pub fn convert_value(source: Value) -> ConvertResult<Migration> {
    match migrate(source) {
        Ok(migration) => {
            let report = migration.report;
            info!(
                "event=migrate module=service status=ok passthrough={} subjects={} skipped_subjects={} cards={} unresolved_modules={} tabs={} questions={}",
                migration.passthrough,
                report.subjects,
                report.skipped_subjects,
                report.cards,
                report.unresolved_modules,
                report.tabs,
                report.questions
            );
            Ok(migration)
        }
        Err(err) => {
            error!(
                "event=migrate module=service status=error error_code=invalid_shape error={}",
                err
            );
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{convert_value, ConvertError};
    use serde_json::json;

    #[test]
    fn convert_value_wraps_shape_errors() {
        let err = convert_value(json!({"modules": []})).unwrap_err();
        assert!(matches!(err, ConvertError::Migrate(_)));
        assert_eq!(
            err.to_string(),
            "invalid planner document: `modules` must be an object, found array"
        );
    }

    #[test]
    fn convert_value_reports_passthrough() {
        let migration = convert_value(json!({"schedule": {}, "curriculum": []})).unwrap();
        assert!(migration.passthrough);
        assert_eq!(migration.report.subjects, 0);
    }
}
