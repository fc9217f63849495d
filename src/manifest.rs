//! The book manifest: chapter registry plus site-wide settings.
//!
//! A manifest is loaded once and never mutated. It fixes the navigation
//! order of the generated site, so it must stay consistent with the chapter
//! files on disk; [`BookManifest::validate`] catches the inconsistencies that
//! can be detected without touching the filesystem.
//!
//! ```json
//! {
//!   "title": "构建统一的世界观",
//!   "chapters": [
//!     {"id": "preface",  "file": "前言.md",  "title": "前言",   "prev": null,      "next": "chapter1"},
//!     {"id": "chapter1", "file": "第1章.md", "title": "第1章", "prev": "preface", "next": null}
//!   ]
//! }
//! ```

use crate::error::PressError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One chapter of the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterMeta {
    /// Page identifier; the page is written to `<id>.html`.
    pub id: String,
    /// Markdown source file, relative to the source directory.
    #[serde(rename = "file")]
    pub source_file: String,
    /// Display title used in the sidebar and `<title>`.
    pub title: String,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

impl ChapterMeta {
    /// File name of this chapter's page.
    pub fn page_file(&self) -> String {
        page_file(&self.id)
    }

    pub fn prev_link(&self) -> Option<String> {
        self.prev.as_deref().map(page_file)
    }

    pub fn next_link(&self) -> Option<String> {
        self.next.as_deref().map(page_file)
    }
}

fn page_file(id: &str) -> String {
    format!("{id}.html")
}

/// Fixed UI strings of the generated pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteLabels {
    pub home: String,
    pub contents: String,
    pub prev: String,
    pub next: String,
    pub back_home: String,
    /// Text of the footer's repository link.
    pub repository: String,
    /// Body used when a chapter source is missing.
    pub placeholder: String,
}

impl Default for SiteLabels {
    fn default() -> Self {
        Self {
            home: "主页".into(),
            contents: "目录".into(),
            prev: "← 上一章".into(),
            next: "下一章 →".into(),
            back_home: "返回主页".into(),
            repository: "GitHub Repository".into(),
            placeholder: "内容正在生成中...".into(),
        }
    }
}

fn default_lang() -> String {
    "zh-CN".into()
}

/// The whole book: ordered chapters plus page shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookManifest {
    /// Book title, shown in the navbar and every `<title>`.
    pub title: String,
    /// `<html lang>` attribute.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Footer text line (rendered after `&copy;`).
    #[serde(default)]
    pub footer: Option<String>,
    /// Repository URL linked from the footer.
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub labels: SiteLabels,
    pub chapters: Vec<ChapterMeta>,
}

impl BookManifest {
    pub fn new(title: impl Into<String>, chapters: Vec<ChapterMeta>) -> Self {
        Self {
            title: title.into(),
            lang: default_lang(),
            footer: None,
            repository: None,
            labels: SiteLabels::default(),
            chapters,
        }
    }

    /// Parse and validate a manifest from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, PressError> {
        let manifest: Self =
            serde_json::from_str(json).map_err(|e| PressError::InvalidManifest(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read, parse and validate a manifest file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PressError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            PressError::InvalidManifest(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Look up a chapter by id.
    pub fn get(&self, id: &str) -> Option<&ChapterMeta> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Check that the manifest is usable.
    ///
    /// - at least one chapter
    /// - ids are non-empty and unique
    /// - every `prev`/`next` names a chapter of this manifest
    pub fn validate(&self) -> Result<(), PressError> {
        if self.chapters.is_empty() {
            return Err(PressError::InvalidManifest("no chapters defined".into()));
        }

        let mut ids = HashSet::new();
        for chapter in &self.chapters {
            if chapter.id.trim().is_empty() {
                return Err(PressError::InvalidManifest(format!(
                    "chapter '{}' has an empty id",
                    chapter.title
                )));
            }
            if !ids.insert(chapter.id.as_str()) {
                return Err(PressError::InvalidManifest(format!(
                    "duplicate chapter id '{}'",
                    chapter.id
                )));
            }
        }

        for chapter in &self.chapters {
            for (field, target) in [("prev", &chapter.prev), ("next", &chapter.next)] {
                if let Some(target) = target {
                    if !ids.contains(target.as_str()) {
                        return Err(PressError::InvalidManifest(format!(
                            "chapter '{}' has {field} '{target}' which is not defined",
                            chapter.id
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
