//! Error types for the bookpress library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PressError`]: **Fatal**: the run cannot proceed at all (missing
//!   PDF, no chapter bookmarks, a page range that fails to extract, an
//!   unwritable output file). Returned as `Err(PressError)` from the
//!   top-level `split_*` and `build_site*` functions.
//!
//! * [`ChapterError`]: **Non-fatal**: one chapter could not be built from
//!   its real source (the Markdown file is missing) but a placeholder page
//!   was produced instead. Stored inside [`crate::output::PageOutput`] so
//!   callers can report partial content without losing the whole site.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the bookpress library.
#[derive(Debug, Error)]
pub enum PressError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// The outline has no usable bookmarks at the chapter level.
    #[error("No level-{level} chapters found in the outline of '{path}' (missing bookmarks?)")]
    NoChapterBookmarks { path: PathBuf, level: u32 },

    /// A requested page lies outside the document.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    /// A page range whose start lies after its end.
    #[error("Invalid page range {start}-{end}: start is after end")]
    InvalidPageRange { start: usize, end: usize },

    /// pdfium could not extract text for a page range.
    #[error("Text extraction failed for pages {start}-{end}: {detail}")]
    ExtractionFailed {
        start: usize,
        end: usize,
        detail: String,
    },

    /// pdfium could not copy a page range into a new document.
    #[error("Copying pages {start}-{end} into a new PDF failed: {detail}")]
    PageCopyFailed {
        start: usize,
        end: usize,
        detail: String,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// A chapter source exists but could not be read.
    #[error("Failed to read chapter source '{path}': {source}")]
    SourceReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// The book manifest could not be parsed or is inconsistent.
    #[error("Invalid book manifest: {0}")]
    InvalidManifest(String),

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n\
  • Pass --pdfium-lib /path/to/libpdfium.\n\
  • Place libpdfium next to the working directory or install it system-wide.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single chapter page.
///
/// The site build continues with placeholder content and records the error
/// on the corresponding [`crate::output::PageOutput`].
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum ChapterError {
    /// The chapter's Markdown source file does not exist.
    #[error("Chapter '{id}': source file not found: {path}")]
    SourceMissing { id: String, path: PathBuf },
}
