//! Progress-callback trait for per-chapter events.
//!
//! Both drivers report through the same trait: a split run counts chapters
//! of the PDF outline, a site build counts manifest chapters. Inject an
//! [`Arc<dyn PressProgressCallback>`] via
//! [`crate::config::SplitConfigBuilder::progress_callback`] or
//! [`crate::config::SiteConfigBuilder::progress_callback`].
//!
//! # Example
//!
//! ```rust
//! use bookpress::{PressProgressCallback, SiteConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl PressProgressCallback for CountingCallback {
//!     fn on_chapter_complete(&self, index: usize, total: usize, title: &str, size: usize) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{index}/{total} {title} ({size})");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { completed: AtomicUsize::new(0) });
//! let _builder = SiteConfig::builder()
//!     .progress_callback(counter as Arc<dyn PressProgressCallback>);
//! ```

use std::sync::Arc;

/// Called by the split and site drivers as they process each chapter.
///
/// Chapters are processed one after another, so calls never overlap for a
/// single run. The trait is still `Send + Sync` because the split driver
/// invokes it from a blocking worker thread. All methods default to no-ops.
pub trait PressProgressCallback: Send + Sync {
    /// Called once before the first chapter.
    fn on_run_start(&self, total_chapters: usize) {
        let _ = total_chapters;
    }

    /// Called before a chapter is processed.
    ///
    /// # Arguments
    /// * `index`: 1-indexed chapter position
    /// * `total`: number of chapters in the run
    /// * `title`: chapter title
    fn on_chapter_start(&self, index: usize, total: usize, title: &str) {
        let _ = (index, total, title);
    }

    /// Called when a chapter's outputs are written.
    ///
    /// `size` is characters of extracted text for a split and bytes of HTML
    /// for a site page.
    fn on_chapter_complete(&self, index: usize, total: usize, title: &str, size: usize) {
        let _ = (index, total, title, size);
    }

    /// Called for a non-fatal problem with a chapter, e.g. a missing
    /// Markdown source replaced by a placeholder.
    fn on_chapter_error(&self, index: usize, total: usize, error: &str) {
        let _ = (index, total, error);
    }

    /// Called once after the last chapter.
    fn on_run_complete(&self, total_chapters: usize, warnings: usize) {
        let _ = (total_chapters, warnings);
    }
}

/// The default when no callback is configured.
pub struct NoopProgressCallback;

impl PressProgressCallback for NoopProgressCallback {}

/// Alias for the type stored in the configs.
pub type ProgressCallback = Arc<dyn PressProgressCallback>;
