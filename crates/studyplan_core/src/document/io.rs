//! File read/write for planner documents.

use super::{DocumentError, DocumentResult};
use log::{error, info};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

/// Reads and parses one JSON document.
///
/// # Side effects
/// - Emits `document_load` logging events with duration and status.
///
/// # Errors
/// - `DocumentError::Read` when the file cannot be read as UTF-8 text.
/// - `DocumentError::Parse` when the content is not one JSON document.
pub fn load_document(path: impl AsRef<Path>) -> DocumentResult<Value> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=document_load module=document status=start path={}",
        path.display()
    );

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            error!(
                "event=document_load module=document status=error duration_ms={} error_code=read_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DocumentError::Read {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(document) => {
            info!(
                "event=document_load module=document status=ok duration_ms={} bytes={}",
                started_at.elapsed().as_millis(),
                text.len()
            );
            Ok(document)
        }
        Err(err) => {
            error!(
                "event=document_load module=document status=error duration_ms={} error_code=parse_failed line={} column={}",
                started_at.elapsed().as_millis(),
                err.line(),
                err.column()
            );
            Err(DocumentError::Parse {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }
}

/// Renders a document as pretty JSON followed by a newline.
pub fn render_document(document: &Value) -> DocumentResult<String> {
    let mut rendered = serde_json::to_string_pretty(document).map_err(DocumentError::Render)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Renders and writes a document, replacing any existing file.
///
/// # Side effects
/// - Emits `document_write` logging events with duration and status.
pub fn write_document(path: impl AsRef<Path>, document: &Value) -> DocumentResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=document_write module=document status=start path={}",
        path.display()
    );

    let rendered = render_document(document)?;
    match std::fs::write(path, rendered.as_bytes()) {
        Ok(()) => {
            info!(
                "event=document_write module=document status=ok duration_ms={} bytes={}",
                started_at.elapsed().as_millis(),
                rendered.len()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=document_write module=document status=error duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(DocumentError::Write {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }
}
