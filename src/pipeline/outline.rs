//! Chapter detection from the PDF outline.
//!
//! The book's bookmarks are a two-level tree: parts at level 1, chapters at
//! level 2. A chapter runs from its bookmark's page up to the page before the
//! next chapter starts; the last chapter runs to the end of the document.

use crate::error::PressError;
use crate::pipeline::document::Bookmark;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Outline depth at which chapters live by default.
pub const DEFAULT_CHAPTER_LEVEL: u32 = 2;

/// A chapter bookmark with a resolved start page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub title: String,
    /// 1-based.
    pub start_page: usize,
}

/// A chapter with its inclusive, 1-based page span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRange {
    pub title: String,
    pub start_page: usize,
    pub end_page: usize,
}

impl ChapterRange {
    pub fn new(title: impl Into<String>, start_page: usize, end_page: usize) -> Self {
        Self {
            title: title.into(),
            start_page,
            end_page,
        }
    }

    /// Number of pages covered; zero for an inverted range.
    pub fn page_count(&self) -> usize {
        (self.end_page + 1).saturating_sub(self.start_page)
    }
}

/// Select the chapter bookmarks at `level`, sorted by start page.
///
/// Bookmarks with an empty title or an unresolvable target page are
/// skipped. `pdf_path` is only used to describe the failure when nothing
/// qualifies.
pub fn chapter_entries(
    bookmarks: &[Bookmark],
    level: u32,
    pdf_path: &Path,
) -> Result<Vec<OutlineEntry>, PressError> {
    let mut entries: Vec<OutlineEntry> = bookmarks
        .iter()
        .filter(|b| b.level == level)
        .filter_map(|b| {
            let title = b.title.trim();
            match (title.is_empty(), b.page) {
                (false, Some(page)) => Some(OutlineEntry {
                    title: title.to_string(),
                    start_page: page,
                }),
                _ => {
                    debug!("Skipping bookmark {:?} (no title or page)", b.title);
                    None
                }
            }
        })
        .collect();

    if entries.is_empty() {
        return Err(PressError::NoChapterBookmarks {
            path: pdf_path.to_path_buf(),
            level,
        });
    }

    entries.sort_by_key(|e| e.start_page);
    Ok(entries)
}

/// Pair every entry with its end page.
///
/// `end = next.start - 1`, or `total_pages` for the last entry; the start is
/// clamped to at least 1 and the end to at least the start.
pub fn chapter_ranges(entries: &[OutlineEntry], total_pages: usize) -> Vec<ChapterRange> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let end = match entries.get(i + 1) {
                Some(next) => next.start_page.saturating_sub(1),
                None => total_pages,
            };
            let start = entry.start_page.max(1);
            ChapterRange::new(entry.title.clone(), start, end.max(start))
        })
        .collect()
}
