//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate document I/O and migration into one conversion call.
//! - Keep the CLI layer free of file and schema details.

pub mod convert_service;
