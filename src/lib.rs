//! # bookpress
//!
//! Publish a book from two sources: the typeset PDF and hand-maintained
//! Markdown chapters.
//!
//! ## Pipelines
//!
//! ```text
//! split:  book.pdf
//!          ├─ 1. Input     validate path and %PDF magic
//!          ├─ 2. Outline   level-2 bookmarks → chapter page ranges
//!          ├─ 3. Extract   per-chapter PDF copy and page text (pdfium)
//!          ├─ 4. Normalize whitespace cleanup
//!          └─ 5. Output    NN-slug.pdf, NN-slug.md, README.md index
//!
//! site:   book.json + chapter .md files
//!          ├─ 1. Convert   Markdown subset → HTML fragment
//!          ├─ 2. Assemble  sidebar TOC, prev/next, KaTeX page shell
//!          └─ 3. Output    <id>.html per chapter
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bookpress::{build_site, BookManifest, SiteConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manifest = BookManifest::from_file("book.json")?;
//!     let config = SiteConfig::builder()
//!         .manifest(manifest)
//!         .output_dir("docs")
//!         .build()?;
//!     let output = build_site(&config).await?;
//!     for warning in output.warnings() {
//!         eprintln!("{warning}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `bookpress` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! bookpress = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod site;
pub mod split;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SiteConfig, SiteConfigBuilder, SplitConfig, SplitConfigBuilder};
pub use error::{ChapterError, PressError};
pub use manifest::{BookManifest, ChapterMeta, SiteLabels};
pub use output::{ChapterOutput, PageOutput, SiteOutput, SiteStats, SplitOutput, SplitStats};
pub use pipeline::document::{Bookmark, PdfSource};
pub use pipeline::html::markdown_to_html;
pub use pipeline::outline::ChapterRange;
pub use progress::{NoopProgressCallback, PressProgressCallback, ProgressCallback};
pub use site::{build_site, build_site_sync, render_chapter};
pub use split::{inspect_outline, split_document, split_pdf, split_pdf_sync};
