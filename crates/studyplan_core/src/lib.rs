//! Core logic for migrating study planner exports.
//! This crate owns the legacy -> curriculum schema mapping and its file glue.

pub mod document;
pub mod logging;
pub mod migrate;
pub mod model;
pub mod service;

pub use document::{load_document, render_document, write_document, DocumentError, DocumentResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use migrate::{
    convert_legacy, is_already_new_schema, migrate, transform, MigrateError, MigrateResult,
    Migration, MigrationReport,
};
pub use model::curriculum::{
    Card, CardModule, CurriculumDocument, Progress, Question, Schedule, Subject, SubjectProgress,
    Tab,
};
pub use service::convert_service::{convert_file, convert_value, ConvertError, ConvertResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
