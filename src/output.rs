//! Result types reported by the job runner.
//!
//! Every input document produces exactly one [`DocumentReport`], success or
//! failure. [`JobSummary`] collects them with the batch-level counters the
//! CLI prints.

use crate::error::{DocumentError, Pdf2TxtError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Document identifier (input file name).
    pub document: String,
    /// Input file path.
    pub input_path: PathBuf,
    /// Where the text was written. `None` when the document failed.
    pub output_path: Option<PathBuf>,
    /// Final text. Empty when the document failed.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub text: String,
    /// Number of pages extracted.
    pub page_count: usize,
    /// Wall-clock time spent on the document.
    pub elapsed_ms: u64,
    /// Failure, if any.
    pub error: Option<DocumentError>,
}

impl DocumentReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a whole job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSummary {
    /// One report per input document, sorted by document identifier.
    pub reports: Vec<DocumentReport>,
    pub succeeded: usize,
    pub failed: usize,
    pub total_duration_ms: u64,
}

impl JobSummary {
    /// Build a summary from reports in completion order.
    pub fn from_reports(mut reports: Vec<DocumentReport>, total_duration_ms: u64) -> Self {
        reports.sort_by(|a, b| a.document.cmp(&b.document));
        let succeeded = reports.iter().filter(|r| r.is_success()).count();
        let failed = reports.len() - succeeded;
        Self {
            reports,
            succeeded,
            failed,
            total_duration_ms,
        }
    }

    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Reports of failed documents only.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentReport> {
        self.reports.iter().filter(|r| !r.is_success())
    }

    /// Treat any document failure as an error.
    pub fn into_result(self) -> Result<Self, Pdf2TxtError> {
        if self.failed > 0 {
            Err(Pdf2TxtError::PartialFailure {
                succeeded: self.succeeded,
                failed: self.failed,
                total: self.total(),
            })
        } else {
            Ok(self)
        }
    }
}
