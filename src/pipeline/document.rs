//! PDF access: the [`PdfSource`] seam and its pdfium implementation.
//!
//! Everything the split pipeline needs from a PDF engine is four
//! operations: page count, flattened outline, the text of one page, and
//! "copy these pages into a new file". Keeping them behind a trait lets the
//! orchestration in [`crate::split`] run against an in-memory fake in tests,
//! while production code uses [`PdfiumSource`].
//!
//! Page indices on this trait are **0-based**; the public 1-based inclusive
//! ranges live in [`crate::pipeline::extract`].

use crate::error::PressError;
use pdfium_render::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, info};

/// One outline node, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Bookmark title as stored in the PDF.
    pub title: String,
    /// Nesting depth; top-level bookmarks are level 1.
    pub level: u32,
    /// 1-based target page, or `None` when the destination does not resolve.
    pub page: Option<usize>,
}

impl Bookmark {
    pub fn new(title: impl Into<String>, level: u32, page: Option<usize>) -> Self {
        Self {
            title: title.into(),
            level,
            page,
        }
    }
}

/// The PDF capabilities the split pipeline consumes.
pub trait PdfSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> usize;

    /// The outline, flattened depth-first in document order.
    fn bookmarks(&self) -> Result<Vec<Bookmark>, PressError>;

    /// Plain text of the page at `index` (0-based).
    ///
    /// Errors are reported as a human-readable diagnostic; the caller wraps
    /// them with the page range being extracted.
    fn page_text(&self, index: usize) -> Result<String, String>;

    /// Write a new PDF at `dest` made of copies of the pages in `pages`
    /// (0-based, inclusive).
    fn write_pages(&self, pages: RangeInclusive<usize>, dest: &Path) -> Result<(), String>;
}

/// [`PdfSource`] backed by a document opened with pdfium.
pub struct PdfiumSource<'a> {
    pdfium: &'a Pdfium,
    document: PdfDocument<'a>,
}

impl<'a> PdfiumSource<'a> {
    /// Open `path` read-only.
    pub fn open(
        pdfium: &'a Pdfium,
        path: &Path,
        password: Option<&'a str>,
    ) -> Result<Self, PressError> {
        let document = pdfium
            .load_pdf_from_file(path, password)
            .map_err(|e| classify_load_error(path, password.is_some(), e))?;
        info!("PDF loaded: {} pages", document.pages().len());
        Ok(Self { pdfium, document })
    }
}

fn classify_load_error(path: &Path, had_password: bool, e: PdfiumError) -> PressError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if had_password {
            PressError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            PressError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        PressError::CorruptPdf {
            path: path.to_path_buf(),
            detail: err_str,
        }
    }
}

impl PdfSource for PdfiumSource<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn bookmarks(&self) -> Result<Vec<Bookmark>, PressError> {
        let mut out = Vec::new();
        if let Some(root) = self.document.bookmarks().root() {
            collect_level(Some(root), 1, &mut out);
        }
        debug!("Outline has {} bookmarks", out.len());
        Ok(out)
    }

    fn page_text(&self, index: usize) -> Result<String, String> {
        let page = self
            .document
            .pages()
            .get(index as u16)
            .map_err(|e| format!("page {}: {:?}", index + 1, e))?;
        let text = page
            .text()
            .map_err(|e| format!("page {}: {:?}", index + 1, e))?;
        Ok(text.all())
    }

    fn write_pages(&self, pages: RangeInclusive<usize>, dest: &Path) -> Result<(), String> {
        let (first, last) = (*pages.start() as u16, *pages.end() as u16);
        let mut out = self
            .pdfium
            .create_new_pdf()
            .map_err(|e| format!("{:?}", e))?;
        out.pages_mut()
            .copy_page_range_from_document(&self.document, first..=last, 0)
            .map_err(|e| format!("{:?}", e))?;
        out.save_to_file(dest).map_err(|e| format!("{:?}", e))?;
        Ok(())
    }
}

/// Walk one sibling chain at `level`, descending into children first.
fn collect_level(mut node: Option<PdfBookmark<'_>>, level: u32, out: &mut Vec<Bookmark>) {
    while let Some(bookmark) = node {
        let page = bookmark
            .destination()
            .and_then(|dest| dest.page_index().ok())
            .map(|idx| idx as usize + 1);
        out.push(Bookmark {
            title: bookmark.title().unwrap_or_default(),
            level,
            page,
        });
        collect_level(bookmark.first_child(), level + 1, out);
        node = bookmark.next_sibling();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_new() {
        let b = Bookmark::new("Chapter 1", 2, Some(5));
        assert_eq!(b.title, "Chapter 1");
        assert_eq!(b.level, 2);
        assert_eq!(b.page, Some(5));
    }
}
