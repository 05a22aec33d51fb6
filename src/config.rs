//! Configuration for a batch text-extraction job.
//!
//! Everything the job runner and the pdfium extractor need is collected in
//! [`JobConfig`], built via [`JobConfigBuilder`]. The reflow engine itself
//! takes no configuration: its thresholds and literals are fixed.

use crate::error::Pdf2TxtError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for a batch job.
///
/// # Example
/// ```rust
/// use pdf2txt_reflow::JobConfig;
///
/// let config = JobConfig::builder()
///     .concurrency(8)
///     .output_dir("out")
///     .header_margin(50.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.concurrency, 8);
/// ```
#[derive(Clone)]
pub struct JobConfig {
    /// Number of documents processed at once. Default: 4.
    ///
    /// Each document is extracted on the blocking thread pool, so this also
    /// bounds how many pdfium documents are open at the same time.
    pub concurrency: usize,

    /// Directory receiving one text file per input document. Default: `output`.
    pub output_dir: PathBuf,

    /// Extension of the output files, without the dot. Default: `txt`.
    pub output_extension: String,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Height of the header band ignored at the top of each page, in PDF points. Default: 36.
    ///
    /// Running headers (company name, report title) repeat on every page and
    /// would otherwise be merged into the body text.
    pub header_margin: f32,

    /// Height of the footer band ignored at the bottom of each page, in PDF points. Default: 36.
    pub footer_margin: f32,

    /// Explicit pdfium library file or directory. If None, the working
    /// directory and then the system library are tried.
    pub pdfium_lib_path: Option<PathBuf>,

    /// Optional progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            output_dir: PathBuf::from("output"),
            output_extension: "txt".to_string(),
            password: None,
            header_margin: 36.0,
            footer_margin: 36.0,
            pdfium_lib_path: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for JobConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobConfig")
            .field("concurrency", &self.concurrency)
            .field("output_dir", &self.output_dir)
            .field("output_extension", &self.output_extension)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("header_margin", &self.header_margin)
            .field("footer_margin", &self.footer_margin)
            .field("pdfium_lib_path", &self.pdfium_lib_path)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn JobProgressCallback>"),
            )
            .finish()
    }
}

impl JobConfig {
    /// Create a new builder for `JobConfig`.
    pub fn builder() -> JobConfigBuilder {
        JobConfigBuilder {
            config: Self::default(),
        }
    }

    /// Path of the text file written for `input`.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.output_dir
            .join(format!("{}.{}", stem, self.output_extension))
    }
}

/// Builder for [`JobConfig`].
#[derive(Debug)]
pub struct JobConfigBuilder {
    config: JobConfig,
}

impl JobConfigBuilder {
    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn output_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.output_extension = ext.into().trim_start_matches('.').to_string();
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn header_margin(mut self, points: f32) -> Self {
        self.config.header_margin = points.max(0.0);
        self
    }

    pub fn footer_margin(mut self, points: f32) -> Self {
        self.config.footer_margin = points.max(0.0);
        self
    }

    pub fn pdfium_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<JobConfig, Pdf2TxtError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(Pdf2TxtError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        if c.output_extension.is_empty() {
            return Err(Pdf2TxtError::InvalidConfig(
                "Output extension must not be empty".into(),
            ));
        }
        if !c.header_margin.is_finite() || !c.footer_margin.is_finite() {
            return Err(Pdf2TxtError::InvalidConfig(format!(
                "Margins must be finite, got header={} footer={}",
                c.header_margin, c.footer_margin
            )));
        }
        Ok(self.config)
    }
}
