//! Page-range extraction: chapter text and chapter PDFs.
//!
//! The public contract is a 1-based inclusive page range, matching how
//! chapter ranges are computed from the outline. [`PdfSource`] works in
//! 0-based indices; the conversion happens here and nowhere else.

use crate::error::PressError;
use crate::pipeline::document::PdfSource;
use crate::pipeline::outline::ChapterRange;
use std::path::Path;
use tracing::debug;

/// Check that `range` lies inside a document of `total` pages.
fn check_range(range: &ChapterRange, total: usize) -> Result<(), PressError> {
    if range.start_page < 1 {
        return Err(PressError::PageOutOfRange {
            page: range.start_page,
            total,
        });
    }
    if range.start_page > range.end_page {
        return Err(PressError::InvalidPageRange {
            start: range.start_page,
            end: range.end_page,
        });
    }
    if range.end_page > total {
        return Err(PressError::PageOutOfRange {
            page: range.end_page,
            total,
        });
    }
    Ok(())
}

/// Extract the raw text of every page in `range`, pages separated by a
/// blank line.
pub fn extract_text<S: PdfSource + ?Sized>(
    source: &S,
    range: &ChapterRange,
) -> Result<String, PressError> {
    check_range(range, source.page_count())?;

    let mut pages = Vec::with_capacity(range.page_count());
    for index in (range.start_page - 1)..range.end_page {
        let text = source
            .page_text(index)
            .map_err(|detail| PressError::ExtractionFailed {
                start: range.start_page,
                end: range.end_page,
                detail,
            })?;
        pages.push(text);
    }

    let text = pages.join("\n\n");
    debug!(
        "Extracted {} chars from pages {}-{}",
        text.len(),
        range.start_page,
        range.end_page
    );
    Ok(text)
}

/// Write the pages in `range` to a new PDF at `dest`.
pub fn extract_pages<S: PdfSource + ?Sized>(
    source: &S,
    range: &ChapterRange,
    dest: &Path,
) -> Result<(), PressError> {
    check_range(range, source.page_count())?;

    let first = range.start_page - 1;
    let last = range.end_page - 1;
    source
        .write_pages(first..=last, dest)
        .map_err(|detail| PressError::PageCopyFailed {
            start: range.start_page,
            end: range.end_page,
            detail,
        })?;
    debug!(
        "Copied pages {}-{} to {}",
        range.start_page,
        range.end_page,
        dest.display()
    );
    Ok(())
}
