//! Per-document conversion: pages of lines in, final text out.
//!
//! [`convert_pages`] is the pure core: page markers, merge pass, fencing
//! pass and newline join. [`convert_document`] wraps it with extraction and the
//! empty-document check, and [`write_output`] persists the result
//! atomically so a failed or interrupted write never leaves a partial file.

use crate::error::DocumentError;
use crate::pipeline::classify::page_marker;
use crate::pipeline::extract::{document_id, PageSource};
use crate::pipeline::fence::{fence, render};
use crate::pipeline::input::validate_pdf;
use crate::pipeline::reflow::{reflow, RawLine};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Text produced for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDocument {
    pub text: String,
    pub page_count: usize,
}

/// Flatten pages into one line sequence with a marker before each page.
///
/// Page numbers are 1-based and follow the order of `pages`.
pub fn flatten_pages<S: AsRef<str>>(pages: &[Vec<S>]) -> Vec<RawLine> {
    let total: usize = pages.iter().map(|p| p.len() + 1).sum();
    let mut lines = Vec::with_capacity(total);
    for (idx, page) in pages.iter().enumerate() {
        let page_num = idx + 1;
        lines.push(RawLine::new(page_marker(page_num), page_num));
        lines.extend(page.iter().map(|l| RawLine::new(l.as_ref(), page_num)));
    }
    lines
}

/// Run the engine over already-extracted pages.
///
/// Never fails; no pages yields an empty string.
pub fn convert_pages<S: AsRef<str>>(pages: &[Vec<S>]) -> String {
    let lines = flatten_pages(pages);
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    let merged = reflow(&texts);
    let fragments = fence(&merged);
    debug!(
        "Reflowed {} raw lines into {} merged lines, {} fragments",
        lines.len(),
        merged.len(),
        fragments.len()
    );
    render(&fragments)
}

/// Extract and convert one document.
///
/// Blocking: call from `spawn_blocking` when running inside tokio.
pub fn convert_document(
    path: &Path,
    source: &dyn PageSource,
) -> Result<ConvertedDocument, DocumentError> {
    validate_pdf(path)?;

    let pages = source.extract_pages(path)?;
    if pages.is_empty() {
        return Err(DocumentError::EmptyDocument {
            document: document_id(path),
        });
    }

    let text = convert_pages(&pages);
    info!(
        "Converted {}: {} pages, {} bytes",
        path.display(),
        pages.len(),
        text.len()
    );
    Ok(ConvertedDocument {
        text,
        page_count: pages.len(),
    })
}

/// Write `text` to `path` atomically: temp file in the same directory, then rename.
pub async fn write_output(path: &Path, text: &str) -> Result<(), DocumentError> {
    let fail = |detail: String| DocumentError::OutputWriteFailed {
        document: document_id(path),
        path: path.to_path_buf(),
        detail,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&parent)
        .await
        .map_err(|e| fail(e.to_string()))?;

    let target = path.to_path_buf();
    let bytes = text.as_bytes().to_vec();
    tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let mut tmp = tempfile::Builder::new()
            .prefix(".pdf2txt-")
            .suffix(".tmp")
            .tempfile_in(&parent)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        // Dropping a failed persist removes the temp file.
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(|e| fail(format!("writer task panicked: {}", e)))?
    .map_err(|e| fail(e.to_string()))
}
