//! Result types returned by the split and site drivers.
//!
//! Everything here is plain data and serialises to JSON, which is what the
//! CLI prints with `--json`.

use crate::error::ChapterError;
use crate::pipeline::outline::ChapterRange;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Split ────────────────────────────────────────────────────────────────

/// One chapter produced by a split run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterOutput {
    /// 1-based position in the outline.
    pub index: usize,
    /// `NN-slug` file stem shared by the chapter's PDF and Markdown files.
    pub stem: String,
    #[serde(flatten)]
    pub range: ChapterRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_path: Option<PathBuf>,
    /// Characters of normalised text (0 when Markdown output is off).
    pub text_chars: usize,
}

/// Aggregate numbers for a split run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitStats {
    pub total_pages: usize,
    pub chapters: usize,
    pub pdf_files: usize,
    pub markdown_files: usize,
    pub duration_ms: u64,
}

/// Everything a split run wrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitOutput {
    /// Name quoted in each chapter's source line.
    pub source: String,
    pub chapters: Vec<ChapterOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_path: Option<PathBuf>,
    pub stats: SplitStats,
}

// ── Site ─────────────────────────────────────────────────────────────────

/// One generated HTML page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageOutput {
    pub id: String,
    pub title: String,
    pub path: PathBuf,
    pub bytes: usize,
    /// Set when the page was built from placeholder content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<ChapterError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteStats {
    pub pages: usize,
    pub placeholders: usize,
    pub total_bytes: usize,
    pub duration_ms: u64,
}

/// Everything a site build wrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteOutput {
    pub output_dir: PathBuf,
    pub pages: Vec<PageOutput>,
    pub stats: SiteStats,
}

impl SiteOutput {
    /// Pages that fell back to placeholder content.
    pub fn warnings(&self) -> impl Iterator<Item = &ChapterError> {
        self.pages.iter().filter_map(|p| p.warning.as_ref())
    }
}
