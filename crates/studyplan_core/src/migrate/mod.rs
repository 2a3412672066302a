//! Legacy planner export -> curriculum schema migration.
//!
//! # Responsibility
//! - Detect documents that already use the curriculum schema.
//! - Convert legacy `home`/`details`/`modules` documents in one pass.
//!
//! # Invariants
//! - Already-migrated documents are returned unchanged.
//! - Source order of subjects, cards, tabs and questions is preserved.
//! - Missing or `null` leaf fields never fail; they take documented defaults.
//! - Only container shape mismatches fail, as `MigrateError::Shape`.

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod access;
mod legacy;

pub use legacy::convert_legacy;

/// Top-level key that only exists in the curriculum schema.
pub const SCHEDULE_KEY: &str = "schedule";
/// Top-level key that only exists in the curriculum schema.
pub const CURRICULUM_KEY: &str = "curriculum";

pub type MigrateResult<T> = Result<T, MigrateError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrateError {
    /// A structural field holds a value of the wrong container type.
    Shape {
        /// Dotted location, e.g. `home.subjects[2]`.
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    /// The converted document could not be turned back into JSON.
    Encode(String),
}

impl MigrateError {
    pub(crate) fn shape(path: String, expected: &'static str, found: &Value) -> Self {
        Self::Shape {
            path,
            expected,
            found: access::json_type_name(found),
        }
    }
}

impl Display for MigrateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shape {
                path,
                expected,
                found,
            } => write!(f, "`{path}` must be an {expected}, found {found}"),
            Self::Encode(message) => write!(f, "failed to encode migrated document: {message}"),
        }
    }
}

impl Error for MigrateError {}

/// Entity counts collected while converting a legacy document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Subjects written to `curriculum`.
    pub subjects: usize,
    /// Subjects dropped because their `id` was missing or falsy.
    pub skipped_subjects: usize,
    pub cards: usize,
    /// Cards whose module reference has no entry in `modules`.
    pub unresolved_modules: usize,
    pub tabs: usize,
    pub questions: usize,
}

/// Result of [`migrate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub document: Value,
    pub report: MigrationReport,
    /// `true` when the input already used the curriculum schema.
    pub passthrough: bool,
}

/// Returns whether `doc` already uses the curriculum schema.
///
/// Only top-level key presence is checked; values are not inspected.
pub fn is_already_new_schema(doc: &Value) -> bool {
    doc.as_object().is_some_and(|fields| {
        fields.contains_key(SCHEDULE_KEY) && fields.contains_key(CURRICULUM_KEY)
    })
}

/// Converts `source` into the curriculum schema.
///
/// Already-migrated documents are returned as-is.
///
/// # Errors
/// - Returns `MigrateError::Shape` when `source` or one of its structural
///   fields has the wrong container type.
pub fn transform(source: Value) -> MigrateResult<Value> {
    migrate(source).map(|migration| migration.document)
}

/// Same as [`transform`], also reporting what was converted.
pub fn migrate(source: Value) -> MigrateResult<Migration> {
    if is_already_new_schema(&source) {
        return Ok(Migration {
            document: source,
            report: MigrationReport::default(),
            passthrough: true,
        });
    }

    let Value::Object(fields) = &source else {
        return Err(MigrateError::shape(
            "$".to_string(),
            access::EXPECTED_OBJECT,
            &source,
        ));
    };

    let (document, report) = convert_legacy(fields)?;
    let document =
        serde_json::to_value(document).map_err(|err| MigrateError::Encode(err.to_string()))?;

    Ok(Migration {
        document,
        report,
        passthrough: false,
    })
}
