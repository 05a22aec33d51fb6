//! Batch entry points: convert many documents on a bounded worker pool.
//!
//! Documents are fully independent. Each one is extracted and reflowed on
//! tokio's blocking pool (pdfium is synchronous), at most
//! [`JobConfig::concurrency`] at a time, and written to its own output file.
//! Completion order is whatever the pool produces; the returned
//! [`JobSummary`] sorts reports by document name.
//!
//! A failing document becomes a failed [`DocumentReport`]; it never aborts
//! its siblings and never leaves a partial output file.

use crate::config::JobConfig;
use crate::convert::{convert_document, write_output};
use crate::error::{DocumentError, Pdf2TxtError};
use crate::output::{DocumentReport, JobSummary};
use crate::pipeline::extract::{document_id, PageSource, PdfiumExtractor};
use crate::pipeline::input::discover_inputs;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Convert every PDF under `input` (a file or a directory) with pdfium.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Returns `Err(Pdf2TxtError)` only for fatal errors: missing input, no PDF
/// files, output directory not creatable, pdfium unavailable. Per-document
/// failures are reported inside the returned [`JobSummary`].
pub async fn run_job(
    input: impl AsRef<Path>,
    config: &JobConfig,
) -> Result<JobSummary, Pdf2TxtError> {
    let inputs = discover_inputs(input.as_ref())?;
    let source: Arc<dyn PageSource> = Arc::new(PdfiumExtractor::new(config)?);
    run_job_with(&inputs, source, config).await
}

/// Synchronous wrapper around [`run_job`].
///
/// Creates a temporary tokio runtime internally.
pub fn run_job_sync(
    input: impl AsRef<Path>,
    config: &JobConfig,
) -> Result<JobSummary, Pdf2TxtError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2TxtError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(run_job(input, config))
}

/// Convert an explicit list of documents with a caller-supplied [`PageSource`].
pub async fn run_job_with(
    inputs: &[PathBuf],
    source: Arc<dyn PageSource>,
    config: &JobConfig,
) -> Result<JobSummary, Pdf2TxtError> {
    let job_start = Instant::now();
    info!(
        "Starting job: {} documents, concurrency {}",
        inputs.len(),
        config.concurrency
    );

    prepare_output_dir(config).await?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_job_start(inputs.len());
    }

    let reports: Vec<DocumentReport> = stream::iter(inputs.iter().cloned())
        .map(|path| process_document(path, Arc::clone(&source), config.clone()))
        .buffer_unordered(config.concurrency)
        .collect()
        .await;

    let summary = JobSummary::from_reports(reports, job_start.elapsed().as_millis() as u64);

    info!(
        "Job complete: {}/{} documents, {}ms total",
        summary.succeeded,
        summary.total(),
        summary.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_job_complete(summary.total(), summary.succeeded);
    }

    Ok(summary)
}

/// Create the output directory shared by all workers.
pub(crate) async fn prepare_output_dir(config: &JobConfig) -> Result<(), Pdf2TxtError> {
    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| Pdf2TxtError::OutputDirFailed {
            path: config.output_dir.clone(),
            source: e,
        })
}

/// Run one document end to end and report the outcome.
///
/// Always returns a report; errors are captured, never propagated.
pub(crate) async fn process_document(
    path: PathBuf,
    source: Arc<dyn PageSource>,
    config: JobConfig,
) -> DocumentReport {
    let start = Instant::now();
    let document = document_id(&path);

    if let Some(ref cb) = config.progress_callback {
        cb.on_document_start(&document);
    }

    let blocking_path = path.clone();
    let converted = tokio::task::spawn_blocking(move || {
        convert_document(&blocking_path, source.as_ref())
    })
    .await
    .unwrap_or_else(|e| {
        Err(DocumentError::ExtractionFailed {
            document: document.clone(),
            detail: format!("worker task panicked: {}", e),
        })
    });

    let output_path = config.output_path_for(&path);
    let outcome = match converted {
        Ok(doc) => write_output(&output_path, &doc.text).await.map(|()| doc),
        Err(e) => Err(e),
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    match outcome {
        Ok(doc) => {
            if let Some(ref cb) = config.progress_callback {
                cb.on_document_complete(&document, doc.text.len(), elapsed_ms);
            }
            DocumentReport {
                document,
                input_path: path,
                output_path: Some(output_path),
                text: doc.text,
                page_count: doc.page_count,
                elapsed_ms,
                error: None,
            }
        }
        Err(e) => {
            warn!("{}", e);
            if let Some(ref cb) = config.progress_callback {
                cb.on_document_error(&document, &e.to_string());
            }
            DocumentReport {
                document,
                input_path: path,
                output_path: None,
                text: String::new(),
                page_count: 0,
                elapsed_ms,
                error: Some(e),
            }
        }
    }
}
