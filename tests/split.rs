//! Split pipeline tests over an in-memory PDF.
//!
//! `FakeBook` stands in for PDFium: it serves page text and an outline from
//! memory and records the page ranges it was asked to copy, writing a small
//! marker file so the output paths can be checked on disk.

use bookpress::{split_document, Bookmark, PdfSource, PressError, SplitConfig};
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

struct FakeBook {
    pages: Vec<String>,
    outline: Vec<Bookmark>,
    text_fails: bool,
    copied: Mutex<Vec<RangeInclusive<usize>>>,
}

impl FakeBook {
    /// Twelve pages; chapters "Intro" (p1), "Two Words" (p5) and "终章" (p9)
    /// under one part bookmark.
    fn twelve_pages() -> Self {
        Self {
            pages: (1..=12).map(|n| format!("page {n}  ")).collect(),
            outline: vec![
                Bookmark::new("Part One", 1, Some(1)),
                Bookmark::new("Intro", 2, Some(1)),
                Bookmark::new("Two Words", 2, Some(5)),
                Bookmark::new("Section", 3, Some(6)),
                Bookmark::new("终章", 2, Some(9)),
            ],
            text_fails: false,
            copied: Mutex::new(Vec::new()),
        }
    }
}

impl PdfSource for FakeBook {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn bookmarks(&self) -> Result<Vec<Bookmark>, PressError> {
        Ok(self.outline.clone())
    }

    fn page_text(&self, index: usize) -> Result<String, String> {
        if self.text_fails {
            return Err("no text layer".into());
        }
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| format!("no page {index}"))
    }

    fn write_pages(&self, pages: RangeInclusive<usize>, dest: &Path) -> Result<(), String> {
        std::fs::write(dest, format!("%PDF {pages:?}")).map_err(|e| e.to_string())?;
        self.copied.lock().unwrap().push(pages);
        Ok(())
    }
}

fn config(dir: &TempDir) -> SplitConfig {
    SplitConfig::builder()
        .input("book.pdf")
        .pdf_dir(dir.path().join("pdf"))
        .markdown_dir(dir.path().join("md"))
        .build()
        .unwrap()
}

#[test]
fn splits_into_three_chapters() {
    let dir = TempDir::new().unwrap();
    let book = FakeBook::twelve_pages();
    let out = split_document(&book, &config(&dir), "book.pdf").unwrap();

    let spans: Vec<_> = out
        .chapters
        .iter()
        .map(|c| (c.range.start_page, c.range.end_page))
        .collect();
    assert_eq!(spans, vec![(1, 4), (5, 8), (9, 12)]);
    assert_eq!(out.stats.total_pages, 12);
    assert_eq!(out.stats.pdf_files, 3);
    assert_eq!(out.stats.markdown_files, 3);

    // 0-based, inclusive.
    assert_eq!(
        book.copied.lock().unwrap().as_slice(),
        &[0..=3, 4..=7, 8..=11]
    );
}

#[test]
fn writes_numbered_files() {
    let dir = TempDir::new().unwrap();
    let book = FakeBook::twelve_pages();
    split_document(&book, &config(&dir), "book.pdf").unwrap();

    for stem in ["01-Intro", "02-Two-Words", "03-终章"] {
        assert!(dir.path().join(format!("pdf/{stem}.pdf")).exists(), "{stem}.pdf");
        assert!(dir.path().join(format!("md/{stem}.md")).exists(), "{stem}.md");
    }
}

#[test]
fn markdown_chapter_has_header_and_normalised_body() {
    let dir = TempDir::new().unwrap();
    let book = FakeBook::twelve_pages();
    split_document(&book, &config(&dir), "book.pdf").unwrap();

    let md = std::fs::read_to_string(dir.path().join("md/02-Two-Words.md")).unwrap();
    assert_eq!(
        md,
        "# Two Words\n\n> 来源：`book.pdf` 第 5-8 页\n\
         page 5\n\npage 6\n\npage 7\n\npage 8\n"
    );
}

#[test]
fn writes_readme_index() {
    let dir = TempDir::new().unwrap();
    let book = FakeBook::twelve_pages();
    let out = split_document(&book, &config(&dir), "book.pdf").unwrap();

    let index = std::fs::read_to_string(dir.path().join("md/README.md")).unwrap();
    assert_eq!(
        index,
        "# 章节目录\n\n\
         - [Intro](01-Intro.md) (第 1-4 页)\n\
         - [Two Words](02-Two-Words.md) (第 5-8 页)\n\
         - [终章](03-终章.md) (第 9-12 页)\n"
    );
    assert_eq!(out.index_path, Some(dir.path().join("md/README.md")));
}

#[test]
fn markdown_only_skips_pdfs() {
    let dir = TempDir::new().unwrap();
    let book = FakeBook::twelve_pages();
    let config = SplitConfig::builder()
        .input("book.pdf")
        .pdf_dir(dir.path().join("pdf"))
        .markdown_dir(dir.path().join("md"))
        .write_pdf(false)
        .write_index(false)
        .build()
        .unwrap();
    let out = split_document(&book, &config, "book.pdf").unwrap();

    assert!(book.copied.lock().unwrap().is_empty());
    assert!(!dir.path().join("pdf").exists());
    assert!(!dir.path().join("md/README.md").exists());
    assert_eq!(out.index_path, None);
    assert!(out.chapters.iter().all(|c| c.pdf_path.is_none()));
}

#[test]
fn pdf_only_skips_text_extraction() {
    let dir = TempDir::new().unwrap();
    let mut book = FakeBook::twelve_pages();
    // Unreadable text must not matter when Markdown output is off.
    book.text_fails = true;
    let config = SplitConfig::builder()
        .input("book.pdf")
        .pdf_dir(dir.path().join("pdf"))
        .markdown_dir(dir.path().join("md"))
        .write_markdown(false)
        .build()
        .unwrap();
    let out = split_document(&book, &config, "book.pdf").unwrap();
    assert_eq!(out.stats.markdown_files, 0);
    assert!(!dir.path().join("md").exists());
}

#[test]
fn text_extraction_failure_aborts() {
    let dir = TempDir::new().unwrap();
    let mut book = FakeBook::twelve_pages();
    book.text_fails = true;
    let err = split_document(&book, &config(&dir), "book.pdf").unwrap_err();
    assert!(matches!(
        err,
        PressError::ExtractionFailed { start: 1, end: 4, .. }
    ));
}

#[test]
fn outline_without_chapters_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut book = FakeBook::twelve_pages();
    book.outline.retain(|b| b.level == 1);
    let err = split_document(&book, &config(&dir), "book.pdf").unwrap_err();
    assert!(matches!(err, PressError::NoChapterBookmarks { level: 2, .. }));
    assert!(!dir.path().join("md/README.md").exists());
}

#[test]
fn chapter_level_is_configurable() {
    let dir = TempDir::new().unwrap();
    let book = FakeBook::twelve_pages();
    let config = SplitConfig::builder()
        .input("book.pdf")
        .pdf_dir(dir.path().join("pdf"))
        .markdown_dir(dir.path().join("md"))
        .chapter_level(1)
        .build()
        .unwrap();
    let out = split_document(&book, &config, "book.pdf").unwrap();
    assert_eq!(out.chapters.len(), 1);
    assert_eq!(out.chapters[0].range.title, "Part One");
    assert_eq!(out.chapters[0].range.end_page, 12);
}

#[test]
fn progress_callback_sees_every_chapter() {
    use bookpress::PressProgressCallback;

    #[derive(Default)]
    struct Count {
        started: AtomicUsize,
        done: AtomicUsize,
    }
    impl PressProgressCallback for Count {
        fn on_chapter_start(&self, _: usize, _: usize, _: &str) {
            self.started.fetch_add(1, Ordering::SeqCst);
        }
        fn on_chapter_complete(&self, _: usize, _: usize, _: &str, _: usize) {
            self.done.fetch_add(1, Ordering::SeqCst);
        }
    }

    let dir = TempDir::new().unwrap();
    let count = Arc::new(Count::default());
    let config = SplitConfig::builder()
        .input("book.pdf")
        .pdf_dir(dir.path().join("pdf"))
        .markdown_dir(dir.path().join("md"))
        .progress_callback(count.clone())
        .build()
        .unwrap();
    split_document(&FakeBook::twelve_pages(), &config, "book.pdf").unwrap();
    assert_eq!(count.started.load(Ordering::SeqCst), 3);
    assert_eq!(count.done.load(Ordering::SeqCst), 3);
}
