//! JSON document loading and writing.
//!
//! # Responsibility
//! - Read one JSON document from disk.
//! - Render documents as pretty JSON and write them to disk.
//!
//! # Invariants
//! - Rendered output uses 2-space indentation, leaves non-ASCII text
//!   unescaped and ends with a single newline.
//! - Object key order is preserved between load and render.
//! - Document content is never logged; only paths, sizes and durations.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod io;

pub use io::{load_document, render_document, write_document};

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Debug)]
pub enum DocumentError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Render(serde_json::Error),
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "`{}` is not valid JSON: {source}", path.display())
            }
            Self::Render(err) => write!(f, "failed to render document: {err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Render(err) => Some(err),
        }
    }
}
