//! CLI binary for pdf2txt-reflow.
//!
//! A thin shim over the library crate that maps CLI flags to `JobConfig`,
//! runs the batch and prints a per-document summary.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2txt_reflow::{
    run_job_with, JobConfig, JobProgressCallback, JobSummary, PageSource, PdfiumExtractor,
    ProgressCallback,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for the batch plus a log line per
/// document. Documents finish out of order, so every line names its file.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Extracting");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl JobProgressCallback for CliProgressCallback {
    fn on_job_start(&self, total_documents: usize) {
        self.bar.set_length(total_documents as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Extracting {total_documents} documents…"))
        ));
    }

    fn on_document_start(&self, document: &str) {
        self.bar.set_message(document.to_string());
    }

    fn on_document_complete(&self, document: &str, text_len: usize, elapsed_ms: u64) {
        self.bar.println(format!(
            "  {} {:<40}  {:<8}  {}",
            green("✓"),
            document,
            dim(&format!("{text_len:>7} bytes")),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_document_error(&self, document: &str, error: &str) {
        // Keep error lines on one terminal row.
        let first_line = error.lines().next().unwrap_or("");
        let msg = if first_line.chars().count() > 80 {
            let cut: String = first_line.chars().take(79).collect();
            format!("{cut}\u{2026}")
        } else {
            first_line.to_string()
        };

        self.bar
            .println(format!("  {} {:<40}  {}", red("✗"), document, red(&msg)));
        self.bar.inc(1);
    }

    fn on_job_complete(&self, _total_documents: usize, _succeeded: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every PDF in a directory into ./output
  pdf2txt ledgers/

  # Single file, custom output directory
  pdf2txt 2024-voucher.pdf -o texts/

  # Encrypted inputs, wider header band, 8 workers
  pdf2txt --password secret --header-margin 60 -c 8 ledgers/ -o out/

  # Machine-readable summary
  pdf2txt --json ledgers/ > summary.json

OUTPUT FORMAT:
  Each page starts with a marker line surrounded by blank lines:
      --- [第 N 页] ---
  Wrapped lines are joined; amounts on their own line are attached to the
  entry above with a tab. Runs of 借/贷 entries are fenced:
      ```text
      借：银行存款	100,000.00
      ```

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to libpdfium (file or directory)
  RUST_LOG          Override log filter (e.g. pdf2txt_reflow=debug)
"#;

/// Extract text from PDF ledgers, rebuilding wrapped lines and fencing entries.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2txt",
    version,
    about = "Extract text from PDF ledgers, rebuilding wrapped lines and fencing accounting entries",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file or directory of PDF files.
    input: PathBuf,

    /// Directory receiving one text file per document.
    #[arg(short, long, env = "PDF2TXT_OUTPUT", default_value = "output")]
    output: PathBuf,

    /// Number of documents processed in parallel.
    #[arg(short, long, env = "PDF2TXT_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2TXT_PASSWORD")]
    password: Option<String>,

    /// Header band ignored at the top of each page, in PDF points.
    #[arg(long, env = "PDF2TXT_HEADER_MARGIN", default_value_t = 36.0)]
    header_margin: f32,

    /// Footer band ignored at the bottom of each page, in PDF points.
    #[arg(long, env = "PDF2TXT_FOOTER_MARGIN", default_value_t = 36.0)]
    footer_margin: f32,

    /// Path to libpdfium (file or directory).
    #[arg(long, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,

    /// Output file extension.
    #[arg(long, env = "PDF2TXT_EXT", default_value = "txt")]
    ext: String,

    /// Print the job summary as JSON on stdout.
    #[arg(long, env = "PDF2TXT_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2TXT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2TXT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2TXT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs; --verbose always wins.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inputs and pdfium ────────────────────────────────────────────────
    let inputs = pdf2txt_reflow::pipeline::input::discover_inputs(&cli.input)
        .context("Failed to collect input files")?;

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn JobProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    let source: Arc<dyn PageSource> = Arc::new(
        PdfiumExtractor::new(&config).context("PDF engine unavailable")?,
    );

    // ── Run ──────────────────────────────────────────────────────────────
    let summary = run_job_with(&inputs, source, &config)
        .await
        .context("Extraction job failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?;
        println!("{json}");
    }

    if !cli.quiet {
        print_summary(&summary, &config);
    }

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Map CLI args to `JobConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<JobConfig> {
    let mut builder = JobConfig::builder()
        .output_dir(&cli.output)
        .concurrency(cli.concurrency)
        .header_margin(cli.header_margin)
        .footer_margin(cli.footer_margin)
        .output_extension(&cli.ext);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd);
    }
    if let Some(ref lib) = cli.pdfium_lib {
        builder = builder.pdfium_lib_path(lib);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Final summary on stderr: counts, then one line per failure.
fn print_summary(summary: &JobSummary, config: &JobConfig) {
    let total = summary.total();
    if summary.failed == 0 {
        eprintln!(
            "{}  {}/{} documents  {}ms  →  {}",
            green("✔"),
            summary.succeeded,
            total,
            summary.total_duration_ms,
            bold(&config.output_dir.display().to_string()),
        );
        return;
    }

    eprintln!(
        "{}  {}/{} documents converted  ({} failed)  {}ms",
        if summary.succeeded == 0 {
            red("✘")
        } else {
            cyan("⚠")
        },
        bold(&summary.succeeded.to_string()),
        total,
        red(&summary.failed.to_string()),
        summary.total_duration_ms,
    );
    for report in summary.failures() {
        if let Some(ref e) = report.error {
            eprintln!("   {} {}", red("✗"), dim(&e.to_string()));
        }
    }
}
