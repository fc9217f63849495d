//! Line-by-line list conversion for the Markdown converter.
//!
//! The chapter sources use a small, consistent list dialect: `- ` bullets,
//! `N. ` numbered items, and nested bullets indented by at least three
//! spaces. Lists are recognised one line at a time with a single line of
//! lookahead, which keeps the behaviour easy to predict for hand-written
//! chapters (a blank line never ends a list; the first real paragraph does).
//!
//! ## States
//!
//! ```text
//!            top-level          nested
//!          ┌──────────────┐   ┌────────┐
//!          │ None         │   │ closed │
//!          │ Unordered ul │ × │ open   │
//!          │ Ordered ol   │   └────────┘
//!          └──────────────┘
//! ```
//!
//! `<ul>` and `<ol>` are never open together: a top-level bullet closes an
//! open `<ol>` and a numbered item closes an open `<ul>`. The nested `<ul>`
//! is independent and is always closed first.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\. ").unwrap());
static RE_ORDERED_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

/// Marker every protected code block placeholder contains.
pub const CODE_PLACEHOLDER_MARKER: &str = "___CODE_BLOCK_";

/// The top-level list currently open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopList {
    #[default]
    None,
    Unordered,
    Ordered,
}

/// Open list containers while scanning one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListState {
    pub top: TopList,
    pub nested: bool,
}

impl ListState {
    pub fn in_unordered(&self) -> bool {
        self.top == TopList::Unordered
    }

    pub fn in_ordered(&self) -> bool {
        self.top == TopList::Ordered
    }

    /// Whether any list container is open.
    pub fn any_open(&self) -> bool {
        self.top != TopList::None || self.nested
    }
}

/// How a single line takes part in list conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `- item`; `indented` when the raw line starts with three spaces.
    Bullet { indented: bool, text: &'a str },
    /// `N. item`.
    Ordered { text: &'a str },
    /// Empty or whitespace-only.
    Blank,
    /// Non-indented text that is not already HTML.
    Content { trimmed: &'a str },
    /// Anything else (indented text, lines starting with `<`).
    Other,
}

/// At least three leading spaces marks a nested bullet.
pub fn is_indented(line: &str) -> bool {
    line.starts_with("   ")
}

/// Classify `line`.
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    let indented = is_indented(line);

    if let Some(text) = trimmed.strip_prefix("- ") {
        return LineKind::Bullet { indented, text };
    }
    if let Some(m) = RE_ORDERED_ITEM.find(trimmed) {
        return LineKind::Ordered {
            text: &trimmed[m.end()..],
        };
    }
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if !indented && !trimmed.starts_with('<') {
        return LineKind::Content { trimmed };
    }
    LineKind::Other
}

/// The lookahead test: does `line` look like the start of a list item?
///
/// Looser than [`classify`]: a leading `-` or `N.` is enough.
pub fn looks_like_list_item(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('-') || RE_ORDERED_PREFIX.is_match(trimmed)
}

/// Display math and code placeholders are emitted bare, never wrapped.
fn is_block_passthrough(trimmed: &str) -> bool {
    trimmed.starts_with("$$") || trimmed.contains(CODE_PLACEHOLDER_MARKER)
}

/// The list state machine. Feed lines in order, then call [`finish`].
///
/// [`finish`]: ListMachine::finish
#[derive(Debug, Default)]
pub struct ListMachine {
    state: ListState,
    out: Vec<String>,
}

impl ListMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    /// Process `line`; `next` is the following line, if any.
    pub fn feed(&mut self, line: &str, next: Option<&str>) {
        match classify(line) {
            LineKind::Bullet {
                indented: true,
                text,
            } => {
                self.open_nested();
                self.item(text);
            }
            LineKind::Bullet {
                indented: false,
                text,
            } => {
                self.close_nested();
                if self.state.in_ordered() {
                    self.close_top();
                }
                if !self.state.in_unordered() {
                    self.emit("<ul>");
                    self.state.top = TopList::Unordered;
                }
                self.item(text);
            }
            LineKind::Ordered { text } => {
                self.close_nested();
                if self.state.in_unordered() {
                    self.close_top();
                }
                if !self.state.in_ordered() {
                    self.emit("<ol>");
                    self.state.top = TopList::Ordered;
                }
                self.item(text);
            }
            LineKind::Blank => {
                self.close_nested();
                self.emit(line);
            }
            LineKind::Content { trimmed } => {
                let next_is_list = next.is_some_and(looks_like_list_item);
                if !next_is_list {
                    self.close_all();
                }
                if is_block_passthrough(trimmed) {
                    self.emit(trimmed);
                } else if !self.state.any_open() {
                    self.out.push(format!("<p>{trimmed}</p>"));
                } else {
                    self.emit(line);
                }
            }
            LineKind::Other => self.emit(line),
        }
    }

    /// Close every open container and return the converted lines.
    pub fn finish(mut self) -> Vec<String> {
        self.close_all();
        self.out
    }

    fn emit(&mut self, s: &str) {
        self.out.push(s.to_string());
    }

    fn item(&mut self, text: &str) {
        self.out.push(format!("<li>{text}</li>"));
    }

    fn open_nested(&mut self) {
        if !self.state.nested {
            self.emit("<ul>");
            self.state.nested = true;
        }
    }

    fn close_nested(&mut self) {
        if self.state.nested {
            self.emit("</ul>");
            self.state.nested = false;
        }
    }

    fn close_top(&mut self) {
        match self.state.top {
            TopList::Unordered => self.emit("</ul>"),
            TopList::Ordered => self.emit("</ol>"),
            TopList::None => {}
        }
        self.state.top = TopList::None;
    }

    /// Nested `<ul>` first, then the top-level list.
    fn close_all(&mut self) {
        self.close_nested();
        self.close_top();
    }
}

/// Run the list machine over every line of `text`.
pub fn convert_lists(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut machine = ListMachine::new();
    for (i, line) in lines.iter().enumerate() {
        machine.feed(line, lines.get(i + 1).copied());
    }
    machine.finish().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            classify("- item"),
            LineKind::Bullet {
                indented: false,
                text: "item"
            }
        );
        assert_eq!(
            classify("    - deep"),
            LineKind::Bullet {
                indented: true,
                text: "deep"
            }
        );
        assert_eq!(
            classify("  - two spaces"),
            LineKind::Bullet {
                indented: false,
                text: "two spaces"
            }
        );
        assert_eq!(classify("12. twelfth"), LineKind::Ordered { text: "twelfth" });
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("Plain"), LineKind::Content { trimmed: "Plain" });
        assert_eq!(classify("<h2>Title</h2>"), LineKind::Other);
        assert_eq!(classify("    indented prose"), LineKind::Other);
        assert_eq!(classify("-dash"), LineKind::Content { trimmed: "-dash" });
        assert_eq!(classify("3.14 is pi"), LineKind::Content { trimmed: "3.14 is pi" });
    }

    #[test]
    fn test_lookahead_is_looser_than_classify() {
        assert!(looks_like_list_item("- a"));
        assert!(looks_like_list_item("---"));
        assert!(looks_like_list_item("3.14"));
        assert!(looks_like_list_item("   2. b"));
        assert!(!looks_like_list_item("text"));
        assert!(!looks_like_list_item(""));
    }

    #[test]
    fn test_bullets_then_paragraph() {
        let out = convert_lists("- a\n- b\n- c\n\npara");
        assert_eq!(
            out,
            "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n\n</ul>\n<p>para</p>"
        );
    }

    #[test]
    fn test_nested_bullets_close_before_next_top_item() {
        let out = convert_lists("- a\n   - b\n   - c\n- d");
        assert_eq!(
            out,
            "<ul>\n<li>a</li>\n<ul>\n<li>b</li>\n<li>c</li>\n</ul>\n<li>d</li>\n</ul>"
        );
    }

    #[test]
    fn test_nested_closed_at_end_in_order() {
        let out = convert_lists("- a\n   - b");
        assert_eq!(out, "<ul>\n<li>a</li>\n<ul>\n<li>b</li>\n</ul>\n</ul>");
    }

    #[test]
    fn test_blank_line_closes_only_nested() {
        let mut m = ListMachine::new();
        m.feed("- a", Some("   - b"));
        m.feed("   - b", Some(""));
        m.feed("", Some("- c"));
        assert_eq!(
            m.state(),
            ListState {
                top: TopList::Unordered,
                nested: false
            }
        );
        m.feed("- c", None);
        assert_eq!(
            m.finish(),
            vec!["<ul>", "<li>a</li>", "<ul>", "<li>b</li>", "</ul>", "", "<li>c</li>", "</ul>"]
        );
    }

    #[test]
    fn test_ordered_list_continues_across_blank_lines() {
        let out = convert_lists("1. one\n\n2. two\n\n7. three");
        assert_eq!(out.matches("<ol>").count(), 1);
        assert_eq!(out.matches("</ol>").count(), 1);
        assert_eq!(
            out,
            "<ol>\n<li>one</li>\n\n<li>two</li>\n\n<li>three</li>\n</ol>"
        );
    }

    #[test]
    fn test_switching_between_ul_and_ol() {
        let out = convert_lists("- a\n1. b\n- c");
        assert_eq!(
            out,
            "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>\n<ul>\n<li>c</li>\n</ul>"
        );
    }

    #[test]
    fn test_interstitial_content_keeps_list_open() {
        // The content line is followed by a list item, so the list stays open
        // and the line is emitted unwrapped.
        let out = convert_lists("1. first\nexplanation\n2. second");
        assert_eq!(
            out,
            "<ol>\n<li>first</li>\nexplanation\n<li>second</li>\n</ol>"
        );
    }

    #[test]
    fn test_content_before_list_is_paragraph() {
        let out = convert_lists("Intro:\n- a");
        assert_eq!(out, "<p>Intro:</p>\n<ul>\n<li>a</li>\n</ul>");
    }

    #[test]
    fn test_display_math_not_wrapped() {
        let out = convert_lists("$$E = mc^2$$\nafter");
        assert_eq!(out, "$$E = mc^2$$\n<p>after</p>");
    }

    #[test]
    fn test_placeholder_closes_list_and_stays_bare() {
        let out = convert_lists("- a\n___CODE_BLOCK_0___\nend");
        assert_eq!(out, "<ul>\n<li>a</li>\n</ul>\n___CODE_BLOCK_0___\n<p>end</p>");
    }

    #[test]
    fn test_html_and_indented_lines_pass_through() {
        let out = convert_lists("<h1>T</h1>\n    code-ish\n<blockquote>q</blockquote>");
        assert_eq!(out, "<h1>T</h1>\n    code-ish\n<blockquote>q</blockquote>");
    }

    #[test]
    fn test_html_line_does_not_close_list() {
        let out = convert_lists("- a\n<h2>Next</h2>\n- b");
        assert_eq!(out, "<ul>\n<li>a</li>\n<h2>Next</h2>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn test_nested_without_parent_opens_single_ul() {
        let out = convert_lists("   - lone");
        assert_eq!(out, "<ul>\n<li>lone</li>\n</ul>");
    }

    #[test]
    fn test_ordered_item_closes_nested_and_bullets() {
        let out = convert_lists("- a\n   - b\n1. c");
        assert_eq!(
            out,
            "<ul>\n<li>a</li>\n<ul>\n<li>b</li>\n</ul>\n</ul>\n<ol>\n<li>c</li>\n</ol>"
        );
    }

    #[test]
    fn test_content_closes_nested_then_top_list() {
        let out = convert_lists("- a\n   - b\npara");
        assert_eq!(
            out,
            "<ul>\n<li>a</li>\n<ul>\n<li>b</li>\n</ul>\n</ul>\n<p>para</p>"
        );
    }
}
