//! Input resolution: validate the user-supplied source PDF path.
//!
//! pdfium reports a missing or non-PDF file as a generic load failure, so
//! the checks here run first and turn those cases into specific errors. The
//! magic bytes (`%PDF`) are verified before pdfium ever sees the file.

use crate::error::PressError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A validated local PDF.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    path: PathBuf,
}

impl ResolvedInput {
    /// Path to the PDF file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used in Markdown source citations.
    pub fn display_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Resolve a local file path, validating existence and PDF magic bytes.
pub fn resolve_input(path: impl AsRef<Path>) -> Result<ResolvedInput, PressError> {
    let path = path.as_ref().to_path_buf();

    if !path.exists() {
        return Err(PressError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(PressError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(PressError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(PressError::FileNotFound { path });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(ResolvedInput { path })
}

/// The file name component of `path`, falling back to the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
