//! Normalisation of raw extracted PDF text into a Markdown body.
//!
//! Text extraction leaves long runs of empty lines where the page layout had
//! vertical whitespace (page breaks, figure gaps). Chapters are edited by
//! hand afterwards, so only the minimum is done here: line endings are
//! unified, trailing whitespace is dropped and blank runs are capped at two.

/// Maximum number of consecutive blank lines kept in the output.
pub const MAX_BLANK_RUN: usize = 2;

/// Normalise raw extracted text.
///
/// - `\r\n`, `\r` and form feeds become line breaks
/// - trailing whitespace is trimmed per line
/// - at most [`MAX_BLANK_RUN`] consecutive blank lines survive
/// - the result is trimmed and ends with exactly one newline
pub fn normalize_text(raw: &str) -> String {
    let unified = normalise_line_breaks(raw);

    let mut kept: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;
    for line in unified.split('\n') {
        if line.trim().is_empty() {
            blank_run += 1;
        } else {
            blank_run = 0;
        }
        if blank_run <= MAX_BLANK_RUN {
            kept.push(line.trim_end());
        }
    }

    let joined = kept.join("\n");
    format!("{}\n", joined.trim())
}

fn normalise_line_breaks(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .replace(['\r', '\u{000C}'], "\n")
}
