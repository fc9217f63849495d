//! Filename sanitising for chapter titles.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_FORBIDDEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\\/:*?"<>|]+"#).unwrap());
static RE_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// Turn an arbitrary chapter title into a filesystem-safe slug.
///
/// Removes `\ / : * ? " < > |`, trims the result, replaces each space with a
/// dash and collapses runs of dashes. An empty title yields an empty slug;
/// callers supply their own fallback name.
pub fn sanitize_filename(name: &str) -> String {
    let stripped = RE_FORBIDDEN.replace_all(name, "");
    let dashed = stripped.trim().replace(' ', "-");
    RE_DASHES.replace_all(&dashed, "-").into_owned()
}

/// File stem for the `index`-th chapter (1-based): `NN-slug`, or
/// `NN-chapter-NN` when the title sanitises to nothing.
pub fn chapter_file_stem(index: usize, title: &str) -> String {
    let slug = sanitize_filename(title);
    let slug = if slug.is_empty() {
        format!("chapter-{index:02}")
    } else {
        slug
    };
    format!("{index:02}-{slug}")
}
