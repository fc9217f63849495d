//! Binding the PDFium dynamic library.
//!
//! Lookup order:
//!
//! 1. An explicit path (`--pdfium-lib` / [`crate::SplitConfig::pdfium_library`])
//! 2. `PDFIUM_LIB_PATH`
//! 3. The platform library name in the working directory
//! 4. The system library search path
//!
//! A candidate path that does not exist is skipped. Nothing is downloaded.

use crate::error::PressError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the PDFium library file.
pub const PDFIUM_LIB_ENV: &str = "PDFIUM_LIB_PATH";

/// File-system candidates in lookup order, before the system fallback.
pub fn library_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(path) = explicit {
        out.push(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(PDFIUM_LIB_ENV) {
        if !path.trim().is_empty() {
            out.push(PathBuf::from(path));
        }
    }
    out.push(Pdfium::pdfium_platform_library_name_at_path("./"));
    out
}

/// Bind PDFium using the lookup order above.
pub fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, PressError> {
    let mut tried = Vec::new();

    for candidate in library_candidates(explicit) {
        if !candidate.exists() {
            debug!("PDFium not found at {}", candidate.display());
            tried.push(format!("{} (missing)", candidate.display()));
            continue;
        }
        match Pdfium::bind_to_library(&candidate) {
            Ok(bindings) => {
                debug!("Bound PDFium from {}", candidate.display());
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => {
                debug!("Binding {} failed: {e}", candidate.display());
                tried.push(format!("{}: {e}", candidate.display()));
            }
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            debug!("Bound system PDFium");
            Ok(Pdfium::new(bindings))
        }
        Err(e) => {
            tried.push(format!("system library: {e}"));
            Err(PressError::PdfiumBindingFailed(tried.join("; ")))
        }
    }
}
