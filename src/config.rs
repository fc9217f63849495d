//! Configuration types for the split and site pipelines.
//!
//! Each pipeline is controlled by one config struct built through its
//! builder. `build()` is the only place validation happens, so a config
//! that exists is always usable.

use crate::error::PressError;
use crate::manifest::BookManifest;
use crate::pipeline::outline::DEFAULT_CHAPTER_LEVEL;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Default directory for per-chapter PDFs.
pub const DEFAULT_PDF_DIR: &str = "assets/chapters";
/// Default directory for per-chapter Markdown and the chapter index.
pub const DEFAULT_MARKDOWN_DIR: &str = "docs/chapters";
/// Default directory for generated HTML pages.
pub const DEFAULT_SITE_DIR: &str = "docs";

// ── Split ────────────────────────────────────────────────────────────────

/// Configuration for splitting a book PDF into chapters.
///
/// # Example
/// ```rust
/// use bookpress::SplitConfig;
///
/// let config = SplitConfig::builder()
///     .input("book.pdf")
///     .markdown_dir("out/md")
///     .write_pdf(false)
///     .build()
///     .unwrap();
/// assert_eq!(config.chapter_level, 2);
/// ```
#[derive(Clone)]
pub struct SplitConfig {
    /// Source PDF.
    pub input: PathBuf,

    /// Directory for `NN-slug.pdf` files. Default: `assets/chapters`.
    pub pdf_dir: PathBuf,

    /// Directory for `NN-slug.md` files and `README.md`. Default: `docs/chapters`.
    pub markdown_dir: PathBuf,

    /// Write per-chapter PDFs. Default: true.
    pub write_pdf: bool,

    /// Write per-chapter Markdown. Default: true.
    pub write_markdown: bool,

    /// Write the `README.md` chapter index (Markdown output only). Default: true.
    pub write_index: bool,

    /// Outline depth of chapter bookmarks. Default: 2.
    pub chapter_level: u32,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Name quoted in each chapter's source line. Default: the input's
    /// file name.
    pub source_label: Option<String>,

    /// Explicit PDFium library path.
    pub pdfium_library: Option<PathBuf>,

    pub progress_callback: Option<ProgressCallback>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            pdf_dir: PathBuf::from(DEFAULT_PDF_DIR),
            markdown_dir: PathBuf::from(DEFAULT_MARKDOWN_DIR),
            write_pdf: true,
            write_markdown: true,
            write_index: true,
            chapter_level: DEFAULT_CHAPTER_LEVEL,
            password: None,
            source_label: None,
            pdfium_library: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for SplitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitConfig")
            .field("input", &self.input)
            .field("pdf_dir", &self.pdf_dir)
            .field("markdown_dir", &self.markdown_dir)
            .field("write_pdf", &self.write_pdf)
            .field("write_markdown", &self.write_markdown)
            .field("write_index", &self.write_index)
            .field("chapter_level", &self.chapter_level)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("source_label", &self.source_label)
            .field("pdfium_library", &self.pdfium_library)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn PressProgressCallback>"),
            )
            .finish()
    }
}

impl SplitConfig {
    pub fn builder() -> SplitConfigBuilder {
        SplitConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SplitConfig`].
#[derive(Debug)]
pub struct SplitConfigBuilder {
    config: SplitConfig,
}

impl SplitConfigBuilder {
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input = path.into();
        self
    }

    pub fn pdf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pdf_dir = dir.into();
        self
    }

    pub fn markdown_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.markdown_dir = dir.into();
        self
    }

    pub fn write_pdf(mut self, v: bool) -> Self {
        self.config.write_pdf = v;
        self
    }

    pub fn write_markdown(mut self, v: bool) -> Self {
        self.config.write_markdown = v;
        self
    }

    pub fn write_index(mut self, v: bool) -> Self {
        self.config.write_index = v;
        self
    }

    pub fn chapter_level(mut self, level: u32) -> Self {
        self.config.chapter_level = level;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn source_label(mut self, label: impl Into<String>) -> Self {
        self.config.source_label = Some(label.into());
        self
    }

    pub fn pdfium_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SplitConfig, PressError> {
        let c = &self.config;
        if c.input.as_os_str().is_empty() {
            return Err(PressError::InvalidConfig("no input PDF given".into()));
        }
        if !c.write_pdf && !c.write_markdown {
            return Err(PressError::InvalidConfig(
                "nothing to do: both PDF and Markdown output are disabled".into(),
            ));
        }
        if c.chapter_level == 0 {
            return Err(PressError::InvalidConfig(
                "chapter level must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Site ─────────────────────────────────────────────────────────────────

/// Configuration for building the HTML site from Markdown chapters.
#[derive(Clone)]
pub struct SiteConfig {
    pub manifest: BookManifest,

    /// Directory the manifest's `file` entries are relative to. Default: `.`.
    pub source_dir: PathBuf,

    /// Directory for `<id>.html` pages. Default: `docs`.
    pub output_dir: PathBuf,

    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("book", &self.manifest.title)
            .field("chapters", &self.manifest.chapters.len())
            .field("source_dir", &self.source_dir)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl SiteConfig {
    pub fn builder() -> SiteConfigBuilder {
        SiteConfigBuilder {
            manifest: None,
            source_dir: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_SITE_DIR),
            progress_callback: None,
        }
    }
}

/// Builder for [`SiteConfig`].
pub struct SiteConfigBuilder {
    manifest: Option<BookManifest>,
    source_dir: PathBuf,
    output_dir: PathBuf,
    progress_callback: Option<ProgressCallback>,
}

impl SiteConfigBuilder {
    pub fn manifest(mut self, manifest: BookManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.progress_callback = Some(cb);
        self
    }

    /// Build the configuration; the manifest is required and validated.
    pub fn build(self) -> Result<SiteConfig, PressError> {
        let manifest = self
            .manifest
            .ok_or_else(|| PressError::InvalidConfig("no book manifest given".into()))?;
        manifest.validate()?;
        Ok(SiteConfig {
            manifest,
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            progress_callback: self.progress_callback,
        })
    }
}
