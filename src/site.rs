//! Site entry points: Markdown chapters in, one HTML page per chapter out.
//!
//! The chapter list and navigation come from the [`BookManifest`]. A chapter
//! whose source file does not exist yet still gets a page, built from a
//! placeholder body, and the miss is recorded as a [`ChapterError`] on its
//! [`PageOutput`]. Any other I/O failure aborts the build.

use crate::config::SiteConfig;
use crate::error::{ChapterError, PressError};
use crate::manifest::{BookManifest, ChapterMeta};
use crate::output::{PageOutput, SiteOutput, SiteStats};
use crate::pipeline::{html, page};
use std::io::ErrorKind;
use std::time::Instant;
use tracing::{info, warn};

/// Convert one chapter's Markdown and wrap it in the page shell.
pub fn render_chapter(chapter: &ChapterMeta, markdown: &str, manifest: &BookManifest) -> String {
    let fragment = html::markdown_to_html(markdown);
    page::render_page(&fragment, chapter, manifest)
}

/// Markdown used for a chapter whose source is missing.
pub fn placeholder_markdown(chapter: &ChapterMeta, manifest: &BookManifest) -> String {
    format!("# {}\n\n{}", chapter.title, manifest.labels.placeholder)
}

/// Build every page of the site.
pub async fn build_site(config: &SiteConfig) -> Result<SiteOutput, PressError> {
    let started = Instant::now();
    let manifest = &config.manifest;
    let total = manifest.chapters.len();
    info!(
        "Building {} pages into {}",
        total,
        config.output_dir.display()
    );

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .map_err(|e| PressError::OutputWriteFailed {
            path: config.output_dir.clone(),
            source: e,
        })?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(total);
    }

    let mut pages = Vec::with_capacity(total);
    for (i, chapter) in manifest.chapters.iter().enumerate() {
        let index = i + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_chapter_start(index, total, &chapter.title);
        }

        let source_path = config.source_dir.join(&chapter.source_file);
        let (markdown, warning) = match tokio::fs::read_to_string(&source_path).await {
            Ok(text) => (text, None),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Chapter source not found: {}", source_path.display());
                let missing = ChapterError::SourceMissing {
                    id: chapter.id.clone(),
                    path: source_path.clone(),
                };
                if let Some(ref cb) = config.progress_callback {
                    cb.on_chapter_error(index, total, &missing.to_string());
                }
                (placeholder_markdown(chapter, manifest), Some(missing))
            }
            Err(e) => {
                return Err(PressError::SourceReadFailed {
                    path: source_path,
                    source: e,
                })
            }
        };

        let html = render_chapter(chapter, &markdown, manifest);
        let path = config.output_dir.join(chapter.page_file());
        tokio::fs::write(&path, &html)
            .await
            .map_err(|e| PressError::OutputWriteFailed {
                path: path.clone(),
                source: e,
            })?;
        info!("Generated {} ({})", chapter.title, chapter.page_file());

        if let Some(ref cb) = config.progress_callback {
            cb.on_chapter_complete(index, total, &chapter.title, html.len());
        }
        pages.push(PageOutput {
            id: chapter.id.clone(),
            title: chapter.title.clone(),
            path,
            bytes: html.len(),
            warning,
        });
    }

    let placeholders = pages.iter().filter(|p| p.warning.is_some()).count();
    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(total, placeholders);
    }

    let stats = SiteStats {
        pages: pages.len(),
        placeholders,
        total_bytes: pages.iter().map(|p| p.bytes).sum(),
        duration_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        "Site complete: {} pages ({} placeholders) in {}ms",
        stats.pages, stats.placeholders, stats.duration_ms
    );

    Ok(SiteOutput {
        output_dir: config.output_dir.clone(),
        pages,
        stats,
    })
}

/// Synchronous wrapper around [`build_site`].
///
/// Creates a temporary tokio runtime internally.
pub fn build_site_sync(config: &SiteConfig) -> Result<SiteOutput, PressError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| PressError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(build_site(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> BookManifest {
        BookManifest::new(
            "Book",
            vec![ChapterMeta {
                id: "preface".into(),
                source_file: "preface.md".into(),
                title: "前言".into(),
                prev: None,
                next: None,
            }],
        )
    }

    #[test]
    fn test_placeholder_markdown() {
        let m = book();
        assert_eq!(
            placeholder_markdown(&m.chapters[0], &m),
            "# 前言\n\n内容正在生成中..."
        );
    }

    #[test]
    fn test_render_chapter_wraps_fragment() {
        let m = book();
        let html = render_chapter(&m.chapters[0], "# 前言\n\nHello", &m);
        assert!(html.contains("<h1>前言</h1>"));
        assert!(html.contains("<p>Hello</p>"));
        assert!(html.contains(r#"<a href="preface.html" class="active">前言</a>"#));
    }
}
