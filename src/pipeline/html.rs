//! Markdown-to-HTML conversion for hand-maintained chapter sources.
//!
//! This is not a CommonMark implementation. It handles exactly the subset
//! the chapters are written in, as a fixed sequence of passes:
//!
//! 1. Protect fenced code blocks behind `___CODE_BLOCK_<n>___` placeholders
//! 2. Headings `#`..`####`
//! 3. One `<blockquote>` per `> ` line
//! 4. `**strong**`, then `*em*`, then `` `code` ``
//! 5. Lists and paragraphs ([`crate::pipeline::lists`])
//! 6. Restore code blocks as `<pre><code>` with spaces as `&nbsp;`
//!
//! Pass order matters: code must be hidden before any other substitution,
//! and `**` must be consumed before `*`. Inline HTML and `$`/`$$` math are
//! passed through untouched for the browser and KaTeX.
//!
//! Running the converter on its own output is not supported.

use crate::pipeline::lists::{convert_lists, CODE_PLACEHOLDER_MARKER};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```\n(.*?)\n```").unwrap());

static RE_HEADINGS: Lazy<[(Regex, &'static str); 4]> = Lazy::new(|| {
    [
        (Regex::new(r"(?m)^# (.+)$").unwrap(), "<h1>${1}</h1>"),
        (Regex::new(r"(?m)^## (.+)$").unwrap(), "<h2>${1}</h2>"),
        (Regex::new(r"(?m)^### (.+)$").unwrap(), "<h3>${1}</h3>"),
        (Regex::new(r"(?m)^#### (.+)$").unwrap(), "<h4>${1}</h4>"),
    ]
});

static RE_BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^> (.+)$").unwrap());
static RE_STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static RE_EM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Placeholder token for the `n`-th protected code block.
pub fn code_placeholder(n: usize) -> String {
    format!("{CODE_PLACEHOLDER_MARKER}{n}___")
}

/// Verbatim fenced code blocks, indexed by discovery order.
#[derive(Debug, Default)]
pub struct CodeBlockTable {
    blocks: Vec<String>,
}

impl CodeBlockTable {
    /// Replace every fenced block in `markdown` with its placeholder.
    pub fn protect(&mut self, markdown: &str) -> String {
        RE_CODE_FENCE
            .replace_all(markdown, |caps: &Captures<'_>| {
                let token = code_placeholder(self.blocks.len());
                self.blocks.push(caps[1].to_string());
                token
            })
            .into_owned()
    }

    /// Put every block back as `<pre><code>`, spaces as `&nbsp;`.
    pub fn restore(&self, html: &str) -> String {
        let mut out = html.to_string();
        for (n, code) in self.blocks.iter().enumerate() {
            let block = format!("<pre><code>{}</code></pre>", code.replace(' ', "&nbsp;"));
            out = out.replace(&code_placeholder(n), &block);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Convert one chapter of Markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut code = CodeBlockTable::default();
    let html = code.protect(markdown);

    let html = convert_headings(&html);
    let html = RE_BLOCKQUOTE
        .replace_all(&html, "<blockquote>${1}</blockquote>")
        .into_owned();
    let html = convert_inline(&html);
    let html = convert_lists(&html);

    code.restore(&html)
}

fn convert_headings(input: &str) -> String {
    RE_HEADINGS
        .iter()
        .fold(input.to_string(), |acc, (re, rep)| {
            re.replace_all(&acc, *rep).into_owned()
        })
}

fn convert_inline(input: &str) -> String {
    let s = RE_STRONG.replace_all(input, "<strong>${1}</strong>");
    let s = RE_EM.replace_all(&s, "<em>${1}</em>");
    RE_INLINE_CODE
        .replace_all(&s, "<code>${1}</code>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_inline() {
        let input = "# Title\n\nSome *em* and **bold** and `code`.\n";
        assert_eq!(
            markdown_to_html(input),
            "<h1>Title</h1>\n\n<p>Some <em>em</em> and <strong>bold</strong> and <code>code</code>.</p>\n"
        );
    }

    #[test]
    fn test_heading_levels() {
        let out = markdown_to_html("## Two\n### Three\n#### Four\n##### Five");
        assert!(out.contains("<h2>Two</h2>"));
        assert!(out.contains("<h3>Three</h3>"));
        assert!(out.contains("<h4>Four</h4>"));
        // Five hashes is not a heading; it stays a paragraph.
        assert!(out.contains("<p>##### Five</p>"));
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(markdown_to_html("#hashtag"), "<p>#hashtag</p>");
    }

    #[test]
    fn test_each_quote_line_is_own_blockquote() {
        let out = markdown_to_html("> one\n> two");
        assert_eq!(out, "<blockquote>one</blockquote>\n<blockquote>two</blockquote>");
    }

    #[test]
    fn test_bold_before_italic() {
        let out = markdown_to_html("**a** *b* ***c***");
        // Lines starting with a tag are left unwrapped by the list pass.
        assert_eq!(out, "<strong>a</strong> <em>b</em> <strong><em>c</strong></em>");
    }

    #[test]
    fn test_code_block_content_is_protected() {
        let input = "Text\n\n```\n# not a heading\n- not a list\n**raw**\n```\n\nAfter";
        let out = markdown_to_html(input);
        assert_eq!(
            out,
            "<p>Text</p>\n\n<pre><code>#&nbsp;not&nbsp;a&nbsp;heading\n-&nbsp;not&nbsp;a&nbsp;list\n**raw**</code></pre>\n\n<p>After</p>"
        );
    }

    #[test]
    fn test_code_block_preserves_alignment() {
        let input = "```\n+---+\n|   |\n+---+\n```";
        let out = markdown_to_html(input);
        assert_eq!(out, "<pre><code>+---+\n|&nbsp;&nbsp;&nbsp;|\n+---+</code></pre>");
    }

    #[test]
    fn test_code_blocks_restored_in_order() {
        let input = "```\nfirst\n```\n\n```\nsecond\n```\n\n```\nthird\n```";
        let out = markdown_to_html(input);
        let first = out.find("first").unwrap();
        let second = out.find("second").unwrap();
        let third = out.find("third").unwrap();
        assert!(first < second && second < third);
        assert_eq!(out.matches("<pre><code>").count(), 3);
        assert!(!out.contains(CODE_PLACEHOLDER_MARKER));
    }

    #[test]
    fn test_protect_numbers_from_zero() {
        let mut table = CodeBlockTable::default();
        let protected = table.protect("a\n```\nx\n```\nb\n```\ny\n```");
        assert_eq!(protected, "a\n___CODE_BLOCK_0___\nb\n___CODE_BLOCK_1___");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_fence_with_language_tag_is_not_protected() {
        let mut table = CodeBlockTable::default();
        let protected = table.protect("```rust\nfn main() {}\n```");
        assert!(table.is_empty());
        assert_eq!(protected, "```rust\nfn main() {}\n```");
    }

    #[test]
    fn test_inline_code_not_emphasised_inside_fence() {
        let out = markdown_to_html("```\n*x* `y`\n```");
        assert_eq!(out, "<pre><code>*x*&nbsp;`y`</code></pre>");
    }

    #[test]
    fn test_list_closed_before_paragraph() {
        let out = markdown_to_html("- one\n- two\n- three\n\nDone.");
        assert_eq!(out.matches("<ul>").count(), 1);
        assert_eq!(out.matches("<li>").count(), 3);
        let close = out.find("</ul>").unwrap();
        let para = out.find("<p>Done.</p>").unwrap();
        assert!(close < para);
    }

    #[test]
    fn test_list_items_get_inline_formatting() {
        let out = markdown_to_html("- **Key**: value");
        assert_eq!(out, "<ul>\n<li><strong>Key</strong>: value</li>\n</ul>");
    }

    #[test]
    fn test_display_math_passthrough() {
        let out = markdown_to_html("$$\\int_0^1 x\\,dx$$\n\nText");
        assert_eq!(out, "$$\\int_0^1 x\\,dx$$\n\n<p>Text</p>");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(markdown_to_html(""), "");
    }
}
