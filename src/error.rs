//! Error types for the pdf2txt-reflow library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2TxtError`] — **Fatal**: the job cannot proceed at all (input path
//!   missing, no PDFs to convert, output directory not writable, pdfium not
//!   available). Returned as `Err(Pdf2TxtError)` from the `run_job*`
//!   functions.
//!
//! * [`DocumentError`] — **Non-fatal**: a single document failed (empty,
//!   corrupt, encrypted) but its siblings are fine. Stored inside
//!   [`crate::output::DocumentReport`] so a bad file never costs the rest of
//!   the batch.
//!
//! The line-reflow engine itself has no error path: classification, merging
//! and fencing are total over any line sequence.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2txt-reflow library.
#[derive(Debug, Error)]
pub enum Pdf2TxtError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input path was not found.
    #[error("Input not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Input directory exists but holds no PDF files.
    #[error("No PDF files found in '{path}'")]
    NoInputFiles { path: PathBuf },

    /// Listing the input directory failed.
    #[error("Failed to read input directory '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create the output directory.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// At least one document failed.
    ///
    /// Returned by [`crate::output::JobSummary::into_result`] when the caller
    /// wants to treat any document failure as an error.
    #[error("{failed}/{total} documents failed")]
    PartialFailure {
        succeeded: usize,
        failed: usize,
        total: usize,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Place libpdfium next to the binary or in the working directory.\n\
  • Install pdfium system-wide.\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (or --pdfium-lib).\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single document.
///
/// Stored in [`crate::output::DocumentReport`]; the job continues with the
/// next document and no output file is written for this one.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum DocumentError {
    /// Extraction produced zero pages.
    #[error("{document}: no pages to extract")]
    EmptyDocument { document: String },

    /// The file exists but is not a PDF. `magic` holds up to four leading bytes.
    #[error("{document}: not a PDF (first bytes {magic:?})")]
    NotAPdf { document: String, magic: Vec<u8> },

    /// Process does not have read permission on the file.
    #[error("{document}: permission denied")]
    PermissionDenied { document: String },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("{document}: corrupt PDF: {detail}")]
    CorruptPdf { document: String, detail: String },

    /// PDF requires a password but none was provided.
    #[error("{document}: encrypted, provide --password")]
    PasswordRequired { document: String },

    /// A password was provided but it is wrong.
    #[error("{document}: wrong password")]
    WrongPassword { document: String },

    /// Any other extraction failure.
    #[error("{document}: extraction failed: {detail}")]
    ExtractionFailed { document: String, detail: String },

    /// Writing the output text failed.
    #[error("{document}: failed to write '{path}': {detail}")]
    OutputWriteFailed {
        document: String,
        path: PathBuf,
        detail: String,
    },
}

impl DocumentError {
    /// `true` for the expected "nothing to convert" outcome.
    pub fn is_empty_document(&self) -> bool {
        matches!(self, DocumentError::EmptyDocument { .. })
    }
}
