//! Streaming job API: emit document reports as they complete.
//!
//! Unlike [`crate::job::run_job_with`], which returns only after every
//! document finishes, [`run_job_stream`] yields each [`DocumentReport`] as
//! soon as its worker is done. Reports arrive in completion order, not input
//! order. Progress callbacks still fire per document; the job-level
//! `on_job_start`/`on_job_complete` events are left to the caller, who owns
//! the stream's lifetime.

use crate::config::JobConfig;
use crate::error::Pdf2TxtError;
use crate::job::{prepare_output_dir, process_document};
use crate::output::DocumentReport;
use crate::pipeline::extract::PageSource;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::Stream;
use tracing::info;

/// A boxed stream of document reports.
pub type ReportStream = Pin<Box<dyn Stream<Item = DocumentReport> + Send>>;

/// Convert documents, streaming a report for each as it completes.
///
/// # Returns
/// - `Ok(ReportStream)` — one item per input, successful or not
/// - `Err(Pdf2TxtError)` — the output directory could not be created
///
/// # Example
/// ```rust,no_run
/// use pdf2txt_reflow::{run_job_stream, JobConfig, PdfiumExtractor};
/// use futures::StreamExt;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = JobConfig::default();
/// let source = Arc::new(PdfiumExtractor::new(&config)?);
/// let inputs = vec!["ledger.pdf".into()];
/// let mut reports = run_job_stream(inputs, source, &config).await?;
/// while let Some(report) = reports.next().await {
///     println!("{}: ok={}", report.document, report.is_success());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_job_stream(
    inputs: Vec<PathBuf>,
    source: Arc<dyn PageSource>,
    config: &JobConfig,
) -> Result<ReportStream, Pdf2TxtError> {
    info!("Starting streaming job: {} documents", inputs.len());
    prepare_output_dir(config).await?;

    let concurrency = config.concurrency;
    let config = config.clone();
    let s = stream::iter(inputs)
        .map(move |path| process_document(path, Arc::clone(&source), config.clone()))
        .buffer_unordered(concurrency);

    Ok(Box::pin(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentError;
    use std::path::Path;

    struct OnePage;

    impl PageSource for OnePage {
        fn extract_pages(&self, _path: &Path) -> Result<Vec<Vec<String>>, DocumentError> {
            Ok(vec![vec!["贷：应收账款".into(), "50,000.00".into()]])
        }
    }

    #[tokio::test]
    async fn stream_yields_one_report_per_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut inputs = Vec::new();
        for name in ["a.pdf", "b.pdf", "c.pdf"] {
            let p = dir.path().join(name);
            std::fs::write(&p, b"%PDF-1.7").unwrap();
            inputs.push(p);
        }
        let config = JobConfig::builder()
            .output_dir(dir.path().join("out"))
            .concurrency(2)
            .build()
            .unwrap();

        let reports: Vec<_> = run_job_stream(inputs, Arc::new(OnePage), &config)
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(reports.len(), 3);
        for r in &reports {
            assert!(r.is_success(), "{:?}", r.error);
            assert!(r.text.contains("贷：应收账款\t50,000.00"));
        }
    }
}
