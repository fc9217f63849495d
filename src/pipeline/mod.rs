//! Pipeline stages for splitting the book PDF and building the HTML site.
//!
//! Each submodule implements one transformation step and is testable on its
//! own; the drivers in [`crate::split`] and [`crate::site`] wire them up.
//!
//! ## Data Flow
//!
//! ```text
//! split:  input ──▶ engine ──▶ document ──▶ outline ──▶ extract ──▶ normalize
//!         (path)    (pdfium)   (bookmarks)  (ranges)    (text/pdf)  (cleanup)
//!
//! site:   chapter .md ──▶ html ──▶ page
//!                       (+ lists)  (shell)
//! ```
//!
//! 1. [`input`]: validate the source PDF path
//! 2. [`engine`]: bind the PDFium library
//! 3. [`document`]: the [`document::PdfSource`] seam over PDFium
//! 4. [`outline`]: chapter bookmarks and their page ranges
//! 5. [`extract`]: chapter text and chapter PDFs for a range
//! 6. [`normalize`]: whitespace cleanup of extracted text
//! 7. [`sanitize`]: chapter file names
//! 8. [`html`] and [`lists`]: the Markdown subset converter
//! 9. [`page`]: the shared page shell

pub mod document;
pub mod engine;
pub mod extract;
pub mod html;
pub mod input;
pub mod lists;
pub mod normalize;
pub mod outline;
pub mod page;
pub mod sanitize;
