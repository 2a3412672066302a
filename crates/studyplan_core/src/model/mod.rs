//! Target schema for migrated planner documents.
//!
//! # Responsibility
//! - Define the typed shape written by the migration.
//! - Fix output key order through struct field order.
//!
//! # Invariants
//! - Identity and free-text fields are kept as raw JSON values, so legacy
//!   values of unexpected type survive the migration untouched.
//! - Every trackable entity carries its counters in a nested progress object.

pub mod curriculum;
