//! CLI binary for bookpress.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `SplitConfig` / `SiteConfig` and prints results.

use anyhow::{Context, Result};
use bookpress::{
    build_site, inspect_outline, split_pdf, BookManifest, ChapterRange, PressProgressCallback,
    ProgressCallback, SiteConfig, SplitConfig,
};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
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

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: a bar at the bottom plus one log line per chapter.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Label shown while the bar runs ("Splitting", "Building").
    verb: &'static str,
    chapter_started: Mutex<Option<Instant>>,
}

impl CliProgressCallback {
    /// Spinner until `on_run_start` reports the chapter count.
    fn new_dynamic(verb: &'static str) -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading inputs…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            verb,
            chapter_started: Mutex::new(None),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} chapters  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix(self.verb);
    }

    fn take_elapsed(&self) -> f64 {
        self.chapter_started
            .lock()
            .ok()
            .and_then(|mut started| started.take())
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl PressProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_chapters: usize) {
        self.activate_bar(total_chapters);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("{} {total_chapters} chapters…", self.verb))
        ));
    }

    fn on_chapter_start(&self, _index: usize, _total: usize, title: &str) {
        if let Ok(mut started) = self.chapter_started.lock() {
            *started = Some(Instant::now());
        }
        self.bar.set_message(title.to_string());
    }

    fn on_chapter_complete(&self, index: usize, total: usize, title: &str, size: usize) {
        let elapsed = self.take_elapsed();
        self.bar.println(format!(
            "  {} {:>2}/{:<2}  {}  {}",
            green("✓"),
            index,
            total,
            title,
            dim(&format!("{size:>6}  {elapsed:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_chapter_error(&self, index: usize, total: usize, error: &str) {
        self.bar.println(format!(
            "  {} {:>2}/{:<2}  {}",
            yellow("⚠"),
            index,
            total,
            yellow(error),
        ));
    }

    fn on_run_complete(&self, total_chapters: usize, warnings: usize) {
        self.bar.finish_and_clear();
        if warnings == 0 {
            eprintln!(
                "{} {} chapters done",
                green("✔"),
                bold(&total_chapters.to_string())
            );
        } else {
            eprintln!(
                "{} {} chapters done  ({} with placeholder content)",
                yellow("⚠"),
                bold(&total_chapters.to_string()),
                yellow(&warnings.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Split a book into chapter PDFs and Markdown, with a README index
  bookpress split book.pdf

  # Markdown only, into a custom directory
  bookpress split book.pdf --no-pdf --markdown-dir drafts/

  # Show the detected chapters without writing anything
  bookpress outline book.pdf

  # Build the HTML site from book.json into docs/
  bookpress site

  # Machine-readable result
  bookpress site --json > site.json

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to an existing libpdfium
  RUST_LOG          Log filter, overrides -v / -q
  BOOKPRESS_*       Fallback for every flag, e.g. BOOKPRESS_PDF_DIR
"#;

/// Split a book PDF by its outline and build its HTML chapter site.
#[derive(Parser, Debug)]
#[command(
    name = "bookpress",
    version,
    about = "Split a book PDF by its bookmarks and build its HTML chapter site",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "BOOKPRESS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "BOOKPRESS_QUIET")]
    quiet: bool,

    /// Disable progress bar.
    #[arg(long, global = true, env = "BOOKPRESS_NO_PROGRESS")]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a PDF into per-chapter PDF and Markdown files.
    Split(SplitArgs),
    /// Print the chapter ranges detected from a PDF's bookmarks.
    Outline(OutlineArgs),
    /// Generate one HTML page per manifest chapter.
    Site(SiteArgs),
}

/// Options shared by the commands that open a PDF.
#[derive(Args, Debug)]
struct PdfArgs {
    /// Source PDF.
    input: PathBuf,

    /// Outline depth of chapter bookmarks.
    #[arg(long, env = "BOOKPRESS_LEVEL", default_value_t = 2,
          value_parser = clap::value_parser!(u32).range(1..))]
    level: u32,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "BOOKPRESS_PASSWORD")]
    password: Option<String>,

    /// Path to the PDFium library.
    #[arg(long, env = "BOOKPRESS_PDFIUM_LIB")]
    pdfium_lib: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SplitArgs {
    #[command(flatten)]
    pdf: PdfArgs,

    /// Directory for chapter PDFs.
    #[arg(long, env = "BOOKPRESS_PDF_DIR", default_value = "assets/chapters")]
    pdf_dir: PathBuf,

    /// Directory for chapter Markdown and README.md.
    #[arg(long, env = "BOOKPRESS_MARKDOWN_DIR", default_value = "docs/chapters")]
    markdown_dir: PathBuf,

    /// Do not write chapter PDFs.
    #[arg(long, env = "BOOKPRESS_NO_PDF")]
    no_pdf: bool,

    /// Do not write chapter Markdown.
    #[arg(long, env = "BOOKPRESS_NO_MARKDOWN")]
    no_markdown: bool,

    /// Do not write the README.md chapter index.
    #[arg(long, env = "BOOKPRESS_NO_INDEX")]
    no_index: bool,

    /// Name quoted in each chapter's source line (default: the PDF file name).
    #[arg(long, env = "BOOKPRESS_SOURCE_LABEL")]
    source_label: Option<String>,

    /// Print the result as JSON.
    #[arg(long, env = "BOOKPRESS_JSON")]
    json: bool,
}

#[derive(Args, Debug)]
struct OutlineArgs {
    #[command(flatten)]
    pdf: PdfArgs,

    /// Print the ranges as JSON.
    #[arg(long, env = "BOOKPRESS_JSON")]
    json: bool,
}

#[derive(Args, Debug)]
struct SiteArgs {
    /// Book manifest (JSON).
    #[arg(long, env = "BOOKPRESS_MANIFEST", default_value = "book.json")]
    manifest: PathBuf,

    /// Directory the manifest's chapter files are relative to.
    #[arg(long, env = "BOOKPRESS_SOURCE_DIR", default_value = ".")]
    source_dir: PathBuf,

    /// Directory for the generated pages.
    #[arg(long, env = "BOOKPRESS_OUTPUT_DIR", default_value = "docs")]
    output_dir: PathBuf,

    /// Print the result as JSON.
    #[arg(long, env = "BOOKPRESS_JSON")]
    json: bool,
}

impl Command {
    fn json(&self) -> bool {
        match self {
            Command::Split(a) => a.json,
            Command::Outline(a) => a.json,
            Command::Site(a) => a.json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // INFO logs would interleave with the bar, so the bar silences them.
    let show_progress = !cli.quiet
        && !cli.no_progress
        && !cli.command.json()
        && !matches!(cli.command, Command::Outline(_));
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

    match cli.command {
        Command::Split(ref args) => run_split(args, &cli, show_progress).await,
        Command::Outline(ref args) => run_outline(args).await,
        Command::Site(ref args) => run_site(args, &cli, show_progress).await,
    }
}

fn progress(show: bool, verb: &'static str) -> Option<ProgressCallback> {
    show.then(|| CliProgressCallback::new_dynamic(verb) as Arc<dyn PressProgressCallback>)
}

fn split_builder(pdf: &PdfArgs) -> bookpress::SplitConfigBuilder {
    let mut builder = SplitConfig::builder()
        .input(&pdf.input)
        .chapter_level(pdf.level);
    if let Some(ref pwd) = pdf.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(ref lib) = pdf.pdfium_lib {
        builder = builder.pdfium_library(lib);
    }
    builder
}

async fn run_split(args: &SplitArgs, cli: &Cli, show_progress: bool) -> Result<()> {
    let mut builder = split_builder(&args.pdf)
        .pdf_dir(&args.pdf_dir)
        .markdown_dir(&args.markdown_dir)
        .write_pdf(!args.no_pdf)
        .write_markdown(!args.no_markdown)
        .write_index(!args.no_index);
    if let Some(ref label) = args.source_label {
        builder = builder.source_label(label.clone());
    }
    if let Some(cb) = progress(show_progress, "Splitting") {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    let output = split_pdf(&config).await.context("Split failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        let s = &output.stats;
        eprintln!(
            "{}  {} chapters from {} pages  {}ms",
            green("✔"),
            s.chapters,
            s.total_pages,
            s.duration_ms
        );
        if s.pdf_files > 0 {
            eprintln!(
                "   {} PDFs      →  {}",
                s.pdf_files,
                bold(&config.pdf_dir.display().to_string())
            );
        }
        if s.markdown_files > 0 {
            eprintln!(
                "   {} Markdown  →  {}",
                s.markdown_files,
                bold(&config.markdown_dir.display().to_string())
            );
        }
    }
    Ok(())
}

async fn run_outline(args: &OutlineArgs) -> Result<()> {
    let config = split_builder(&args.pdf)
        .build()
        .context("Invalid configuration")?;
    let ranges = inspect_outline(&config)
        .await
        .context("Failed to read outline")?;

    if args.json {
        let json = serde_json::to_string_pretty(&ranges).context("Failed to serialise ranges")?;
        println!("{json}");
    } else {
        print_ranges(&ranges);
    }
    Ok(())
}

fn print_ranges(ranges: &[ChapterRange]) {
    for (i, r) in ranges.iter().enumerate() {
        println!(
            "{:>3}  {:>4}-{:<4}  {}",
            i + 1,
            r.start_page,
            r.end_page,
            r.title
        );
    }
}

async fn run_site(args: &SiteArgs, cli: &Cli, show_progress: bool) -> Result<()> {
    let manifest = BookManifest::from_file(&args.manifest)
        .with_context(|| format!("Failed to load manifest {:?}", args.manifest))?;

    let mut builder = SiteConfig::builder()
        .manifest(manifest)
        .source_dir(&args.source_dir)
        .output_dir(&args.output_dir);
    if let Some(cb) = progress(show_progress, "Building") {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    let output = build_site(&config).await.context("Site build failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else if !cli.quiet {
        if !show_progress {
            for warning in output.warnings() {
                eprintln!("{} {}", yellow("⚠"), warning);
            }
        }
        eprintln!(
            "{}  {} pages  {}ms  →  {}",
            green("✔"),
            output.stats.pages,
            output.stats.duration_ms,
            bold(&output.output_dir.display().to_string()),
        );
    }
    Ok(())
}
