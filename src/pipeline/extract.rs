//! Text extraction: turn each PDF page into ordered, normalised lines.
//!
//! The engine only needs "pages of lines", so extraction sits behind the
//! [`PageSource`] trait. [`PdfiumExtractor`] is the production source; tests
//! substitute an in-memory one.
//!
//! ## How lines are built
//!
//! pdfium reports text as segments: runs of characters sharing a bounding
//! rectangle. For each page we
//!
//! 1. drop segments that sit inside the header or footer margin,
//! 2. group consecutive segments whose vertical extents overlap into one line,
//! 3. collapse runs of whitespace and drop lines that end up empty.
//!
//! pdfium is synchronous and not async-safe; callers run
//! [`PageSource::extract_pages`] inside `spawn_blocking`.

use crate::config::JobConfig;
use crate::error::{DocumentError, Pdf2TxtError};
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Source of per-page text lines for one document.
pub trait PageSource: Send + Sync {
    /// Extract every page of `path`, in page order.
    ///
    /// Returns an empty vector for a document with no pages.
    fn extract_pages(&self, path: &Path) -> Result<Vec<Vec<String>>, DocumentError>;
}

/// A run of text with its vertical extent, in PDF points (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub top: f32,
    pub bottom: f32,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, top: f32, bottom: f32) -> Self {
        Self {
            text: text.into(),
            top,
            bottom,
        }
    }
}

/// [`PageSource`] backed by the pdfium library.
pub struct PdfiumExtractor {
    pdfium: Pdfium,
    password: Option<String>,
    header_margin: f32,
    footer_margin: f32,
}

impl PdfiumExtractor {
    /// Bind pdfium and capture the extraction settings from `config`.
    pub fn new(config: &JobConfig) -> Result<Self, Pdf2TxtError> {
        let pdfium = bind_pdfium(config.pdfium_lib_path.as_deref())?;
        Ok(Self {
            pdfium,
            password: config.password.clone(),
            header_margin: config.header_margin,
            footer_margin: config.footer_margin,
        })
    }
}

impl PageSource for PdfiumExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<Vec<String>>, DocumentError> {
        let password = self.password.as_deref();
        let document = self
            .pdfium
            .load_pdf_from_file(path, password)
            .map_err(|e| load_error(path, password.is_some(), e))?;

        let pages = document.pages();
        info!("PDF loaded: {} pages ({})", pages.len(), path.display());

        let mut out = Vec::with_capacity(pages.len() as usize);
        for (idx, page) in pages.iter().enumerate() {
            let text = page.text().map_err(|e| DocumentError::ExtractionFailed {
                document: document_id(path),
                detail: format!("page {}: {:?}", idx + 1, e),
            })?;

            let height = page.height().value;
            let spans: Vec<TextSpan> = text
                .segments()
                .iter()
                .map(|segment| {
                    let rect = segment.bounds();
                    TextSpan::new(segment.text(), rect.top().value, rect.bottom().value)
                })
                .filter(|span| {
                    in_body(span, height, self.header_margin, self.footer_margin)
                })
                .collect();

            let lines = group_into_lines(&spans);
            debug!("Extracted page {} → {} lines", idx + 1, lines.len());
            out.push(lines);
        }

        Ok(out)
    }
}

/// Bind to a pdfium library.
///
/// Resolution order: the explicit path (a library file or a directory that
/// contains one), the current working directory, then the system library.
pub fn bind_pdfium(lib_path: Option<&Path>) -> Result<Pdfium, Pdf2TxtError> {
    let bindings = match lib_path {
        Some(p) => {
            let file: PathBuf = if p.is_dir() {
                Pdfium::pdfium_platform_library_name_at_path(p)
            } else {
                p.to_path_buf()
            };
            Pdfium::bind_to_library(&file)
        }
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| Pdf2TxtError::PdfiumBindingFailed(format!("{:?}", e)))?;

    Ok(Pdfium::new(bindings))
}

/// Map a pdfium load failure to a document error.
fn load_error(path: &Path, had_password: bool, e: PdfiumError) -> DocumentError {
    let detail = format!("{:?}", e);
    if detail.contains("Password") || detail.contains("password") {
        if had_password {
            DocumentError::WrongPassword {
                document: document_id(path),
            }
        } else {
            DocumentError::PasswordRequired {
                document: document_id(path),
            }
        }
    } else {
        DocumentError::CorruptPdf {
            document: document_id(path),
            detail,
        }
    }
}

/// Identifier used in reports: the file name, or the full path if it has none.
pub fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `true` when the span lies outside the header and footer margins.
pub fn in_body(span: &TextSpan, page_height: f32, header_margin: f32, footer_margin: f32) -> bool {
    span.bottom >= footer_margin && span.top <= page_height - header_margin
}

/// Group spans that share a baseline into normalised lines.
///
/// Two consecutive spans belong to the same line when their vertical extents
/// overlap by at least half the smaller height.
pub fn group_into_lines(spans: &[TextSpan]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut extent: Option<(f32, f32)> = None;

    for span in spans {
        let same_line = extent.is_some_and(|(top, bottom)| overlaps(top, bottom, span));
        if !same_line {
            push_line(&mut lines, &current);
            current.clear();
            extent = Some((span.top, span.bottom));
        } else if let Some((top, bottom)) = extent.as_mut() {
            *top = top.max(span.top);
            *bottom = bottom.min(span.bottom);
            current.push(' ');
        }
        current.push_str(&span.text);
    }
    push_line(&mut lines, &current);

    lines
}

fn overlaps(top: f32, bottom: f32, span: &TextSpan) -> bool {
    let overlap = top.min(span.top) - bottom.max(span.bottom);
    let smaller = (top - bottom).min(span.top - span.bottom).max(0.01);
    overlap >= smaller * 0.5
}

fn push_line(lines: &mut Vec<String>, raw: &str) {
    let line = normalize_whitespace(raw);
    if !line.is_empty() {
        lines.push(line);
    }
}

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
