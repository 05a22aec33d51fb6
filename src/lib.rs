//! # pdf2txt-reflow
//!
//! Extract text from PDF documents and rebuild it into clean logical lines,
//! with accounting-ledger entries fenced off and page boundaries preserved.
//!
//! ## Why this crate?
//!
//! Raw PDF text comes out one physical line at a time: sentences wrapped at
//! the margin arrive in pieces, and an amount printed in a right-hand column
//! lands on its own line under the entry it belongs to. Feeding that to
//! search, diffing or an LLM loses the structure a human reader sees. This
//! crate runs two small deterministic passes over each document's lines to
//! put it back together.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     discover *.pdf files, check magic bytes
//!  ├─ 2. Extract   pdfium text segments → lines, header/footer margins dropped
//!  ├─ 3. Markers   "--- [第 N 页] ---" before each page
//!  ├─ 4. Reflow    merge wrapped lines, attach amounts to their entry (\t)
//!  ├─ 5. Fence     wrap runs of 借/贷 entries in ```text … ``` blocks
//!  └─ 6. Output    one .txt per document, written atomically
//! ```
//!
//! Documents run in parallel on a bounded pool; each document is processed
//! strictly in order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2txt_reflow::{run_job, JobConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = JobConfig::builder().output_dir("out").build()?;
//!     let summary = run_job("ledgers/", &config).await?;
//!     for failure in summary.failures() {
//!         eprintln!("{}: {:?}", failure.document, failure.error);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The engine is also usable on its own, without pdfium:
//!
//! ```rust
//! use pdf2txt_reflow::convert_pages;
//!
//! let text = convert_pages(&[vec!["贷：应收账款", "50,000.00"]]);
//! assert!(text.contains("贷：应收账款\t50,000.00"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2txt` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod job;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{JobConfig, JobConfigBuilder};
pub use convert::{convert_document, convert_pages, flatten_pages, write_output, ConvertedDocument};
pub use error::{DocumentError, Pdf2TxtError};
pub use job::{run_job, run_job_sync, run_job_with};
pub use output::{DocumentReport, JobSummary};
pub use pipeline::classify::{classify, is_accounting_start, is_sentence_terminated, LineKind};
pub use pipeline::extract::{PageSource, PdfiumExtractor};
pub use pipeline::fence::{BlockFencer, Fragment};
pub use pipeline::reflow::{MergedLine, RawLine, ReflowEngine};
pub use progress::{JobProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{run_job_stream, ReportStream};
