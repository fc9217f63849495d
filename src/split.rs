//! Split entry points: one book PDF in, per-chapter PDFs and Markdown out.
//!
//! The work is done by [`split_document`], a synchronous function over any
//! [`PdfSource`]. [`split_pdf`] binds PDFium and runs it on the blocking
//! thread pool, since PDFium is not async-safe; [`split_pdf_sync`] wraps that
//! in a private runtime.
//!
//! Chapters are processed in outline order and any failure aborts the run.
//! Files already written by an aborted run stay on disk and are overwritten
//! by the next run.

use crate::config::SplitConfig;
use crate::error::PressError;
use crate::output::{ChapterOutput, SplitOutput, SplitStats};
use crate::pipeline::document::{PdfSource, PdfiumSource};
use crate::pipeline::outline::{self, ChapterRange};
use crate::pipeline::sanitize::chapter_file_stem;
use crate::pipeline::{engine, extract, input, normalize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Heading of the generated chapter index.
pub const INDEX_HEADING: &str = "# 章节目录";
/// File name of the generated chapter index.
pub const INDEX_FILE: &str = "README.md";

/// Split a PDF into chapters according to `config`.
///
/// # Errors
/// Every failure is fatal: a missing or unreadable PDF, an outline without
/// chapter bookmarks, a range that fails to extract or copy, or an output
/// file that cannot be written.
pub async fn split_pdf(config: &SplitConfig) -> Result<SplitOutput, PressError> {
    let resolved = input::resolve_input(&config.input)?;
    info!("Starting split: {}", resolved.path().display());

    let config = config.clone();
    let path = resolved.path().to_path_buf();
    let source_name = config
        .source_label
        .clone()
        .unwrap_or_else(|| resolved.display_name());

    tokio::task::spawn_blocking(move || {
        let pdfium = engine::bind_pdfium(config.pdfium_library.as_deref())?;
        let source = PdfiumSource::open(&pdfium, &path, config.password.as_deref())?;
        split_document(&source, &config, &source_name)
    })
    .await
    .map_err(|e| PressError::Internal(format!("Split task panicked: {e}")))?
}

/// Synchronous wrapper around [`split_pdf`].
///
/// Creates a temporary tokio runtime internally.
pub fn split_pdf_sync(config: &SplitConfig) -> Result<SplitOutput, PressError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| PressError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(split_pdf(config))
}

/// Compute the chapter ranges of a PDF without writing anything.
///
/// Uses `input`, `chapter_level`, `password` and `pdfium_library` from
/// `config`; the output settings are ignored.
pub async fn inspect_outline(config: &SplitConfig) -> Result<Vec<ChapterRange>, PressError> {
    let resolved = input::resolve_input(&config.input)?;
    let path = resolved.path().to_path_buf();
    let config = config.clone();

    tokio::task::spawn_blocking(move || {
        let pdfium = engine::bind_pdfium(config.pdfium_library.as_deref())?;
        let source = PdfiumSource::open(&pdfium, &path, config.password.as_deref())?;
        outline_ranges(&source, config.chapter_level, &path)
    })
    .await
    .map_err(|e| PressError::Internal(format!("Outline task panicked: {e}")))?
}

/// Chapter ranges of `source` at outline depth `level`.
pub fn outline_ranges<S: PdfSource + ?Sized>(
    source: &S,
    level: u32,
    pdf_path: &Path,
) -> Result<Vec<ChapterRange>, PressError> {
    let bookmarks = source.bookmarks()?;
    let entries = outline::chapter_entries(&bookmarks, level, pdf_path)?;
    Ok(outline::chapter_ranges(&entries, source.page_count()))
}

/// Run the split pipeline over an opened document.
///
/// `source_name` is the file name quoted in each chapter's source line.
pub fn split_document<S: PdfSource + ?Sized>(
    source: &S,
    config: &SplitConfig,
    source_name: &str,
) -> Result<SplitOutput, PressError> {
    let started = Instant::now();
    let total_pages = source.page_count();
    let ranges = outline_ranges(source, config.chapter_level, &config.input)?;
    let total = ranges.len();
    info!("{} chapters across {} pages", total, total_pages);

    if config.write_pdf {
        create_dir(&config.pdf_dir)?;
    }
    if config.write_markdown {
        create_dir(&config.markdown_dir)?;
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(total);
    }

    let mut chapters = Vec::with_capacity(total);
    for (i, range) in ranges.into_iter().enumerate() {
        let index = i + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_chapter_start(index, total, &range.title);
        }
        let chapter = split_chapter(source, config, source_name, index, range)?;
        if let Some(ref cb) = config.progress_callback {
            cb.on_chapter_complete(index, total, &chapter.range.title, chapter.text_chars);
        }
        chapters.push(chapter);
    }

    let index_path = if config.write_markdown && config.write_index {
        let path = config.markdown_dir.join(INDEX_FILE);
        write_file(&path, index_markdown(&chapters).as_bytes())?;
        info!("Wrote {}", path.display());
        Some(path)
    } else {
        None
    };

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(total, 0);
    }

    let stats = SplitStats {
        total_pages,
        chapters: chapters.len(),
        pdf_files: chapters.iter().filter(|c| c.pdf_path.is_some()).count(),
        markdown_files: chapters.iter().filter(|c| c.markdown_path.is_some()).count(),
        duration_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        "Split complete: {} chapters in {}ms",
        stats.chapters, stats.duration_ms
    );

    Ok(SplitOutput {
        source: source_name.to_string(),
        chapters,
        index_path,
        stats,
    })
}

fn split_chapter<S: PdfSource + ?Sized>(
    source: &S,
    config: &SplitConfig,
    source_name: &str,
    index: usize,
    range: ChapterRange,
) -> Result<ChapterOutput, PressError> {
    let stem = chapter_file_stem(index, &range.title);
    debug!(
        "Chapter {} '{}' pages {}-{}",
        index, range.title, range.start_page, range.end_page
    );

    let pdf_path = if config.write_pdf {
        let path = config.pdf_dir.join(format!("{stem}.pdf"));
        extract::extract_pages(source, &range, &path)?;
        info!(
            "Wrote {} (pages {}-{})",
            path.display(),
            range.start_page,
            range.end_page
        );
        Some(path)
    } else {
        None
    };

    let (markdown_path, text_chars) = if config.write_markdown {
        let raw = extract::extract_text(source, &range)?;
        let body = normalize::normalize_text(&raw);
        let path = config.markdown_dir.join(format!("{stem}.md"));
        write_file(&path, chapter_markdown(&range, source_name, &body).as_bytes())?;
        info!("Wrote {}", path.display());
        (Some(path), body.chars().count())
    } else {
        (None, 0)
    };

    Ok(ChapterOutput {
        index,
        stem,
        range,
        pdf_path,
        markdown_path,
        text_chars,
    })
}

/// A chapter's Markdown file: title, source line, then the normalised body.
pub fn chapter_markdown(range: &ChapterRange, source_name: &str, body: &str) -> String {
    let header = [
        format!("# {}", range.title),
        String::new(),
        format!(
            "> 来源：`{}` 第 {}-{} 页",
            source_name, range.start_page, range.end_page
        ),
        String::new(),
    ];
    format!("{}{}", header.join("\n"), body)
}

/// The chapter index written next to the Markdown chapters.
pub fn index_markdown(chapters: &[ChapterOutput]) -> String {
    let mut lines = vec![INDEX_HEADING.to_string(), String::new()];
    for c in chapters {
        lines.push(format!(
            "- [{}]({}.md) (第 {}-{} 页)",
            c.range.title, c.stem, c.range.start_page, c.range.end_page
        ));
    }
    format!("{}\n", lines.join("\n"))
}

fn create_dir(dir: &Path) -> Result<(), PressError> {
    std::fs::create_dir_all(dir).map_err(|e| PressError::OutputWriteFailed {
        path: dir.to_path_buf(),
        source: e,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), PressError> {
    std::fs::write(path, contents).map_err(|e| PressError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_markdown_header() {
        let md = chapter_markdown(&ChapterRange::new("第1章 本体论", 5, 8), "book.pdf", "正文\n");
        assert_eq!(
            md,
            "# 第1章 本体论\n\n> 来源：`book.pdf` 第 5-8 页\n正文\n"
        );
    }

    #[test]
    fn test_index_markdown() {
        let chapter = |index: usize, title: &str, s: usize, e: usize| ChapterOutput {
            index,
            stem: chapter_file_stem(index, title),
            range: ChapterRange::new(title, s, e),
            pdf_path: None,
            markdown_path: None,
            text_chars: 0,
        };
        let md = index_markdown(&[chapter(1, "Intro", 1, 4), chapter(2, "Two Words", 5, 9)]);
        assert_eq!(
            md,
            "# 章节目录\n\n- [Intro](01-Intro.md) (第 1-4 页)\n- [Two Words](02-Two-Words.md) (第 5-9 页)\n"
        );
    }

    #[test]
    fn test_index_markdown_empty() {
        assert_eq!(index_markdown(&[]), "# 章节目录\n\n");
    }
}
