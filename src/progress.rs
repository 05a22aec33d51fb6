//! Progress-callback trait for per-document job events.
//!
//! Inject an [`Arc<dyn JobProgressCallback>`] via
//! [`crate::config::JobConfigBuilder::progress_callback`] to receive events
//! as the job runner works through its documents.
//!
//! # Example
//!
//! ```rust
//! use pdf2txt_reflow::{JobConfig, JobProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     done: AtomicUsize,
//! }
//!
//! impl JobProgressCallback for CountingCallback {
//!     fn on_document_complete(&self, document: &str, text_len: usize, _elapsed_ms: u64) {
//!         let n = self.done.fetch_add(1, Ordering::SeqCst) + 1;
//!         eprintln!("#{n} {document}: {text_len} bytes");
//!     }
//! }
//!
//! let config = JobConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { done: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the job runner as it processes each document.
///
/// Documents run concurrently, so `on_document_*` methods may be called from
/// several threads at once; protect shared state with `Mutex` or atomics.
/// All methods default to no-ops.
pub trait JobProgressCallback: Send + Sync {
    /// Called once before any document starts.
    fn on_job_start(&self, total_documents: usize) {
        let _ = total_documents;
    }

    /// Called when a worker picks up a document.
    fn on_document_start(&self, document: &str) {
        let _ = document;
    }

    /// Called when a document's text has been written.
    ///
    /// # Arguments
    /// * `document`   — document identifier (file name)
    /// * `text_len`   — byte length of the produced text
    /// * `elapsed_ms` — wall-clock time spent on this document
    fn on_document_complete(&self, document: &str, text_len: usize, elapsed_ms: u64) {
        let _ = (document, text_len, elapsed_ms);
    }

    /// Called when a document fails; the job continues.
    fn on_document_error(&self, document: &str, error: &str) {
        let _ = (document, error);
    }

    /// Called once after every document has been attempted.
    fn on_job_complete(&self, total_documents: usize, succeeded: usize) {
        let _ = (total_documents, succeeded);
    }
}

/// A no-op implementation, the default when no callback is configured.
pub struct NoopProgressCallback;

impl JobProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::JobConfig`].
pub type ProgressCallback = Arc<dyn JobProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: Mutex<Vec<String>>,
        succeeded: AtomicUsize,
    }

    impl JobProgressCallback for TrackingCallback {
        fn on_document_start(&self, _document: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_complete(&self, _document: &str, _text_len: usize, _elapsed_ms: u64) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_document_error(&self, document: &str, _error: &str) {
            self.errors.lock().unwrap().push(document.to_string());
        }

        fn on_job_complete(&self, _total: usize, succeeded: usize) {
            self.succeeded.store(succeeded, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_job_start(2);
        cb.on_document_start("a.pdf");
        cb.on_document_complete("a.pdf", 42, 5);
        cb.on_document_error("b.pdf", "corrupt");
        cb.on_job_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();
        tracker.on_document_start("a.pdf");
        tracker.on_document_complete("a.pdf", 100, 3);
        tracker.on_document_start("b.pdf");
        tracker.on_document_error("b.pdf", "no pages");
        tracker.on_job_complete(2, 1);

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(*tracker.errors.lock().unwrap(), vec!["b.pdf".to_string()]);
        assert_eq!(tracker.succeeded.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_job_start(10);
        cb.on_document_start("x.pdf");
    }
}
